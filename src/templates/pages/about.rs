use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn about_page(ctx: &PageCtx) -> Markup {
    let t = ctx.t();

    desktop_layout(
        ctx,
        t.about_title,
        html! {
            main class="container narrow" {
                h1 { (t.about_heading) }
                p class="lead" { (t.about_lead) }
                p { (t.about_body[0]) (t.about_body[1]) }
                h2 { (t.why_buy) }
                ul {
                    @for reason in &t.reasons {
                        li { (reason) }
                    }
                }
                p { a class="btn primary" href=(ctx.href("/cars")) { (t.browse_inventory) } }
            }
        },
    )
}
