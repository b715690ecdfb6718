// templates/pages/home.rs

use crate::domain::car::Car;
use crate::templates::{car_card, desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn home_page(ctx: &PageCtx, featured: &[Car]) -> Markup {
    let t = ctx.t();

    desktop_layout(
        ctx,
        t.home_title,
        html! {
            section class="hero" {
                div class="container" {
                    h1 { (t.hero_title) }
                    p class="lead" { (t.hero_lead) }
                    div class="hero-actions" {
                        a class="btn primary" href=(ctx.href("/cars")) { (t.browse_inventory) }
                        a class="btn" href=(ctx.href("/contact")) { (t.contact_us) }
                    }
                }
            }

            main class="container" {
                section {
                    h2 { (t.featured_heading) }
                    @if featured.is_empty() {
                        p class="muted" { (t.featured_empty) }
                    } @else {
                        div class="car-grid" {
                            @for car in featured {
                                (car_card(ctx, car))
                            }
                        }
                    }
                    p { a href=(ctx.href("/cars")) { (t.see_all_cars) } }
                }

                section class="benefits" {
                    @for (title, text) in &t.benefits {
                        div { h3 { (title) } p { (text) } }
                    }
                }

                section class="cta" {
                    h2 { (t.cta_heading) }
                    p { (t.cta_text) }
                    a class="btn primary" href=(ctx.href("/contact")) { (t.cta_button) }
                }
            }
        },
    )
}
