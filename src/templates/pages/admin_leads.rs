use crate::domain::lead::{BodyShopLead, Lead, SERVICE_TYPES};
use crate::templates::admin_layout;
use crate::templates::components::fmt_datetime;
use maud::{html, Markup};

fn handled_tabs(base: &str, handled: Option<bool>) -> Markup {
    html! {
        nav class="tabs" {
            a href=(base) class=[handled.is_none().then_some("active")] { "All" }
            a href=(format!("{base}?handled=false")) class=[(handled == Some(false)).then_some("active")] { "Open" }
            a href=(format!("{base}?handled=true")) class=[(handled == Some(true)).then_some("active")] { "Handled" }
        }
    }
}

fn row_actions(base: &str, id: i64, handled: bool) -> Markup {
    html! {
        form class="inline" action=(format!("{base}/{id}/handled")) method="post" {
            input type="hidden" name="handled" value=(if handled { "false" } else { "true" });
            button type="submit" { @if handled { "Reopen" } @else { "Mark handled" } }
        }
        form class="inline" action=(format!("{base}/{id}/delete")) method="post"
            onsubmit="return confirm('Delete this request?');" {
            button type="submit" class="danger" { "Delete" }
        }
    }
}

pub fn leads_page(leads: &[Lead], handled: Option<bool>) -> Markup {
    admin_layout(
        "Leads",
        "/admin/leads",
        html! {
            h1 { "Leads" }
            (handled_tabs("/admin/leads", handled))
            table class="admin-table" {
                thead { tr { th { "Received" } th { "Contact" } th { "Car" } th { "Message" } th {} } }
                tbody {
                    @for lead in leads {
                        tr class=[lead.handled.then_some("handled")] {
                            td { (fmt_datetime(lead.created_at)) }
                            td {
                                strong { (lead.name) } br;
                                a href=(format!("mailto:{}", lead.email)) { (lead.email) }
                                @if let Some(phone) = &lead.phone { br; (phone) }
                            }
                            td {
                                @match (&lead.car_title, lead.car_id) {
                                    (Some(title), Some(id)) => a href=(format!("/admin/cars/{id}/edit")) { (title) },
                                    _ => span class="muted" { "General" },
                                }
                            }
                            td class="message" { (lead.message) }
                            td class="actions" { (row_actions("/admin/leads", lead.id, lead.handled)) }
                        }
                    }
                }
            }
            @if leads.is_empty() {
                p class="muted" { "Nothing here." }
            }
        },
    )
}

fn service_label(value: &str) -> &str {
    SERVICE_TYPES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

pub fn bodyshop_leads_page(leads: &[BodyShopLead], handled: Option<bool>) -> Markup {
    admin_layout(
        "Body shop",
        "/admin/carrosserie",
        html! {
            h1 { "Body-shop requests" }
            (handled_tabs("/admin/carrosserie", handled))
            table class="admin-table" {
                thead { tr { th { "Received" } th { "Contact" } th { "Chassis" } th { "Service" } th { "Message" } th {} } }
                tbody {
                    @for lead in leads {
                        tr class=[lead.handled.then_some("handled")] {
                            td { (fmt_datetime(lead.created_at)) }
                            td {
                                strong { (lead.name) } br;
                                a href=(format!("mailto:{}", lead.email)) { (lead.email) } br;
                                (lead.phone)
                            }
                            td { code { (lead.chassis_number) } }
                            td { (service_label(&lead.service_type)) }
                            td class="message" { (lead.message.as_deref().unwrap_or("")) }
                            td class="actions" { (row_actions("/admin/carrosserie", lead.id, lead.handled)) }
                        }
                    }
                }
            }
            @if leads.is_empty() {
                p class="muted" { "Nothing here." }
            }
        },
    )
}
