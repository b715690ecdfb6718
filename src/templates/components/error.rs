use crate::i18n::Locale;
use crate::templates::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub fn error_page(locale: Locale, status: u16, message: &str) -> Markup {
    let ctx = PageCtx::new(locale, "/", false);
    let t = ctx.t();

    desktop_layout(
        &ctx,
        &format!("{} {status}", t.error),
        html! {
            main class="container narrow error-page" {
                h1 { (t.error) " " (status) }
                p { (message) }
                p { a href=(ctx.href("/")) { (t.back_home) } }
            }
        },
    )
}
