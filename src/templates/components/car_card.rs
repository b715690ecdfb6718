use crate::domain::car::{format_mileage, format_price, Car, CarStatus};
use crate::templates::PageCtx;
use maud::{html, Markup};

pub fn status_badge(status: CarStatus, label: &str) -> Markup {
    html! {
        span class=(format!("badge badge-{}", status.as_str())) { (label) }
    }
}

pub fn car_card(ctx: &PageCtx, car: &Car) -> Markup {
    let t = ctx.t();

    html! {
        a class="car-card" href=(ctx.href(&car.url())) {
            div class="car-card-image" {
                @if let Some(src) = car.cover_image() {
                    img src=(src) alt=(car.title) loading="lazy";
                } @else {
                    div class="no-image" { (t.no_photo) }
                }
                @if car.status != CarStatus::Available {
                    (status_badge(car.status, t.status_label(car.status)))
                }
            }
            div class="car-card-body" {
                p class="muted" { (car.brand) " · " (car.year) }
                h3 { (car.title) }
                p class="specs" {
                    (format_mileage(car.mileage)) " · " (car.fuel_type.as_str()) " · " (car.transmission.as_str())
                }
                p class="price" { (format_price(car.price)) }
            }
        }
    }
}
