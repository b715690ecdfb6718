use maud::{html, Markup, DOCTYPE};

const SECTIONS: &[(&str, &str)] = &[
    ("/admin/dashboard", "Dashboard"),
    ("/admin/cars", "Cars"),
    ("/admin/leads", "Leads"),
    ("/admin/carrosserie", "Body shop"),
];

/// Back-office shell. `active` is the path of the highlighted section.
pub fn admin_layout(title: &str, active: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (title) " | CarCity admin" }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="admin" {
                aside class="admin-sidebar" {
                    a class="logo" href="/admin/dashboard" { "CARCITY" }
                    nav {
                        @for (href, label) in SECTIONS {
                            a href=(href) class=[(active == *href).then_some("active")] { (label) }
                        }
                    }
                    a href="/" target="_blank" { "View site" }
                    form action="/admin/logout" method="post" {
                        button type="submit" class="btn-link" { "Log out" }
                    }
                }
                main class="admin-main" {
                    (content)
                }
            }
        }
    }
}
