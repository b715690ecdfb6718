use maud::{html, Markup, DOCTYPE};

pub fn login_page(error: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { "Sign in | CarCity admin" }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="login" {
                main class="container narrow card" {
                    h1 { "Admin sign in" }
                    @if let Some(msg) = error {
                        p class="alert error" { (msg) }
                    }
                    form action="/admin/login" method="post" {
                        label { "Username" input type="text" name="username" autocomplete="username" required; }
                        label { "Password" input type="password" name="password" autocomplete="current-password" required; }
                        button type="submit" class="primary" { "Sign in" }
                    }
                }
            }
        }
    }
}
