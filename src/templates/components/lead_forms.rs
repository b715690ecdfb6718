use crate::domain::car::Car;
use crate::domain::lead::HONEYPOT_FIELD;
use crate::templates::PageCtx;
use maud::{html, Markup};

/// Hidden from humans; bots fill it in.
fn honeypot() -> Markup {
    html! {
        div class="hp" aria-hidden="true" {
            label for=(HONEYPOT_FIELD) { "Website" }
            input type="text" id=(HONEYPOT_FIELD) name=(HONEYPOT_FIELD) tabindex="-1" autocomplete="off";
        }
    }
}

pub fn inquiry_form(ctx: &PageCtx, car: Option<&Car>) -> Markup {
    let t = ctx.t();

    html! {
        form class="lead-form" action=(ctx.href("/leads")) method="post" {
            @if let Some(car) = car {
                input type="hidden" name="car_id" value=(car.id);
            }
            label { (t.name) input type="text" name="name" required; }
            label { (t.email) input type="email" name="email" required; }
            label { (t.phone_optional) input type="tel" name="phone"; }
            label {
                (t.message)
                textarea name="message" rows="5" required {
                    @if let Some(car) = car {
                        (t.inquiry_prefill) " " (car.title) "."
                    }
                }
            }
            (honeypot())
            button type="submit" class="primary" { (t.send_message) }
        }
    }
}

pub fn bodyshop_form(ctx: &PageCtx) -> Markup {
    let t = ctx.t();

    html! {
        form class="lead-form" action=(ctx.href("/carrosserie")) method="post" {
            label { (t.name) input type="text" name="name" required; }
            label { (t.email) input type="email" name="email" required; }
            label { (t.phone) input type="tel" name="phone" required; }
            label {
                (t.chassis_number)
                input type="text" name="chassis_number" maxlength="17" required;
            }
            label {
                (t.service)
                select name="service_type" required {
                    option value="" disabled selected { (t.choose_service) }
                    @for (value, label) in &t.service_labels {
                        option value=(value) { (label) }
                    }
                }
            }
            label { (t.message_optional) textarea name="message" rows="4" {} }
            (honeypot())
            button type="submit" class="primary" { (t.request_appointment) }
        }
    }
}
