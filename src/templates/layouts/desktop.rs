use crate::i18n::{Locale, Text};
use maud::{html, Markup, DOCTYPE};

pub const DEALER_ADDRESS: &str = "Industrieweg 12, 2880 Bornem";
pub const DEALER_PHONE: &str = "+32 3 123 45 67";
pub const DEALER_EMAIL: &str = "info@carcity.be";

/// What every public page needs besides its own data.
/// `path` is the page's unprefixed path, used by the language switcher.
#[derive(Debug, Clone, Copy)]
pub struct PageCtx<'a> {
    pub locale: Locale,
    pub path: &'a str,
    pub is_admin: bool,
}

impl<'a> PageCtx<'a> {
    pub fn new(locale: Locale, path: &'a str, is_admin: bool) -> Self {
        Self {
            locale,
            path,
            is_admin,
        }
    }

    pub fn t(&self) -> &'static Text {
        self.locale.text()
    }

    pub fn href(&self, path: &str) -> String {
        self.locale.href(path)
    }
}

pub fn desktop_layout(ctx: &PageCtx, title: &str, content: Markup) -> Markup {
    let t = ctx.t();

    html! {
        (DOCTYPE)
        html lang=(ctx.locale.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | CarCity" }
                link rel="stylesheet" href="/static/main.css";
                @for other in Locale::ALL {
                    link rel="alternate" hreflang=(other.as_str()) href=(other.href(ctx.path));
                }
            }
            body {
                header class="site-header" {
                    a class="logo" href=(ctx.href("/")) { "CARCITY" }
                    nav {
                        ul {
                            li { a href=(ctx.href("/")) { (t.nav_home) } }
                            li { a href=(ctx.href("/cars")) { (t.nav_inventory) } }
                            li { a href=(ctx.href("/carrosserie")) { (t.nav_bodyshop) } }
                            li { a href=(ctx.href("/about")) { (t.nav_about) } }
                            li { a href=(ctx.href("/contact")) { (t.nav_contact) } }
                            @if ctx.is_admin {
                                li { a href="/admin/dashboard" { "Admin" } }
                            }
                        }
                    }
                    nav class="lang-switch" aria-label=(t.switch_language) {
                        @for other in Locale::ALL {
                            @if other == ctx.locale {
                                span class="current" { (other.as_str().to_uppercase()) }
                            } @else {
                                a href=(other.href(ctx.path)) hreflang=(other.as_str()) {
                                    (other.as_str().to_uppercase())
                                }
                            }
                        }
                    }
                }

                (content)

                footer class="site-footer" {
                    div class="footer-grid" {
                        div {
                            h3 { "CARCITY" }
                            p { (t.footer_tagline) }
                        }
                        div {
                            h4 { (t.footer_contact) }
                            p { (DEALER_ADDRESS) }
                            p { (DEALER_PHONE) }
                            p { a href=(format!("mailto:{DEALER_EMAIL}")) { (DEALER_EMAIL) } }
                        }
                    }
                    p class="muted" { (t.footer_rights) }
                }
            }
        }
    }
}
