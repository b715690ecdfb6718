use crate::domain::car::{format_mileage, format_price, whatsapp_url, Car, CarStatus};
use crate::i18n::Text;
use crate::templates::components::{inquiry_form, status_badge};
use crate::templates::{car_card, desktop_layout, PageCtx};
use maud::{html, Markup};

pub struct CarDetailVm<'a> {
    pub ctx: PageCtx<'a>,
    pub car: &'a Car,
    pub similar: &'a [Car],
    pub whatsapp_number: &'a str,
}

fn spec_rows(t: &Text, car: &Car) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        (t.year, car.year.to_string()),
        (t.mileage, format_mileage(car.mileage)),
        (t.fuel, car.fuel_type.to_string()),
        (t.transmission, car.transmission.to_string()),
        (t.body, car.body_type.to_string()),
        (t.condition, car.condition.to_string()),
        (t.exterior, car.color_exterior.clone()),
    ];
    let optional = [
        (t.interior, car.color_interior.clone()),
        (t.power, car.power_hp.map(|hp| format!("{hp} hp"))),
        (t.engine, car.engine.clone()),
        (t.drivetrain, car.drivetrain.clone()),
        (t.seats, car.seats.map(|n| n.to_string())),
        (t.doors, car.doors.map(|n| n.to_string())),
    ];
    rows.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));
    rows
}

pub fn car_detail_page(vm: &CarDetailVm) -> Markup {
    let ctx = &vm.ctx;
    let t = ctx.t();
    let car = vm.car;
    let whatsapp = whatsapp_url(
        vm.whatsapp_number,
        &format!("{} {} ({}).", t.whatsapp_greeting, car.title, car.short_id),
    );

    desktop_layout(
        ctx,
        &car.title,
        html! {
            main class="container car-detail" {
                p { a href=(ctx.href("/cars")) { (t.back_to_inventory) } }

                div class="detail-grid" {
                    section class="gallery" {
                        @if car.images.is_empty() {
                            div class="no-image" { (t.no_photo) }
                        }
                        @for (i, src) in car.images.iter().enumerate() {
                            img src=(src) alt=(format!("{} {} {}", car.title, t.photo, i + 1)) loading=(if i == 0 { "eager" } else { "lazy" });
                        }
                    }

                    section class="summary" {
                        p class="muted" { (car.brand) " " (car.model) }
                        h1 { (car.title) }
                        @if car.status != CarStatus::Available {
                            (status_badge(car.status, t.status_label(car.status)))
                        }
                        p class="price" { (format_price(car.price)) }

                        table class="specs" {
                            tbody {
                                @for (label, value) in spec_rows(t, car) {
                                    tr { th { (label) } td { (value) } }
                                }
                            }
                        }

                        a class="btn whatsapp" href=(whatsapp) target="_blank" rel="noopener" { (t.ask_whatsapp) }
                        @if let Some(url) = &car.car_pass_url {
                            a class="btn" href=(url) target="_blank" rel="noopener" { (t.view_car_pass) }
                        }
                    }
                }

                @if !car.features.is_empty() {
                    section {
                        h2 { (t.features) }
                        ul class="features" {
                            @for f in &car.features {
                                li { (f) }
                            }
                        }
                    }
                }

                section {
                    h2 { (t.description) }
                    @for para in car.description.split("\n\n") {
                        p { (para) }
                    }
                }

                section id="inquiry" {
                    h2 { (t.interested) }
                    (inquiry_form(ctx, Some(car)))
                }

                @if !vm.similar.is_empty() {
                    section {
                        h2 { (t.similar_cars) }
                        div class="car-grid" {
                            @for c in vm.similar {
                                (car_card(ctx, c))
                            }
                        }
                    }
                }
            }
        },
    )
}
