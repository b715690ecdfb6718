use crate::templates::components::bodyshop_form;
use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn carrosserie_page(ctx: &PageCtx) -> Markup {
    let t = ctx.t();

    desktop_layout(
        ctx,
        t.bodyshop_title,
        html! {
            main class="container two-col" {
                section {
                    h1 { "Carrosserie" }
                    h2 { (t.our_services) }
                    @for (title, text) in &t.bodyshop_services {
                        div class="service" {
                            h3 { (title) }
                            p { (text) }
                        }
                    }
                    h3 { (t.how_it_works) }
                    ol {
                        @for step in &t.bodyshop_steps {
                            li { (step) }
                        }
                    }
                }
                section class="card" {
                    h2 { (t.appointment_heading) }
                    (bodyshop_form(ctx))
                }
            }
        },
    )
}
