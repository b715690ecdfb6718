use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn thank_you_page(ctx: &PageCtx, message: &str) -> Markup {
    let t = ctx.t();

    desktop_layout(
        ctx,
        t.thank_you_title,
        html! {
            main class="container narrow" {
                h1 { (t.thank_you_heading) }
                p class="lead" { (message) }
                p { a href=(ctx.href("/cars")) { (t.continue_browsing) } }
            }
        },
    )
}
