use crate::templates::components::inquiry_form;
use crate::templates::layouts::desktop::{DEALER_ADDRESS, DEALER_EMAIL, DEALER_PHONE};
use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn contact_page(ctx: &PageCtx) -> Markup {
    let t = ctx.t();

    desktop_layout(
        ctx,
        t.contact_title,
        html! {
            main class="container two-col" {
                section {
                    h1 { (t.contact_heading) }
                    p class="lead" { (t.contact_lead) }
                    (inquiry_form(ctx, None))
                }
                aside class="card" {
                    h3 { (t.visit_showroom) }
                    p { (DEALER_ADDRESS) }
                    p { (DEALER_PHONE) }
                    p { (DEALER_EMAIL) }
                    h4 { (t.opening_hours) }
                    p { (t.hours[0]) br; (t.hours[1]) }
                }
            }
        },
    )
}
