use crate::db::cars::CarStats;
use crate::db::leads::LeadStats;
use crate::domain::car::{format_price, Car};
use crate::domain::expiry::PendingDeletion;
use crate::domain::lead::Lead;
use crate::templates::admin_layout;
use crate::templates::components::{card, fmt_datetime, status_badge};
use maud::{html, Markup};

pub struct DashboardVm {
    pub username: String,
    pub cars: CarStats,
    pub leads: LeadStats,
    pub recent_cars: Vec<Car>,
    pub recent_leads: Vec<Lead>,
    pub pending: Vec<PendingDeletion>,
    /// Cars removed by the sweep that ran for this page load.
    pub swept: usize,
    pub retention_days: i64,
}

fn stat(label: &str, value: i64) -> Markup {
    html! {
        div class="stat" {
            span class="stat-value" { (value) }
            span class="stat-label" { (label) }
        }
    }
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    admin_layout(
        "Dashboard",
        "/admin/dashboard",
        html! {
            h1 { "Dashboard" }
            p class="muted" { "Signed in as " strong { (vm.username) } }

            @if vm.swept > 0 {
                p class="alert" { (vm.swept) " sold car(s) older than " (vm.retention_days) " days were removed." }
            }

            div class="stats" {
                (stat("Cars", vm.cars.total))
                (stat("Available", vm.cars.available))
                (stat("Reserved", vm.cars.reserved))
                (stat("Sold", vm.cars.sold))
                (stat("Featured", vm.cars.featured))
                (stat("Open leads", vm.leads.unhandled))
                (stat("Open body-shop requests", vm.leads.bodyshop_unhandled))
            }

            @if !vm.pending.is_empty() {
                (card("Scheduled for deletion", html! {
                    p class="muted" {
                        "Sold cars are removed " (vm.retention_days) " days after the sale."
                    }
                    table {
                        thead { tr { th { "Car" } th { "Sold" } th { "Removed in" } } }
                        tbody {
                            @for p in &vm.pending {
                                tr class=[p.is_urgent.then_some("urgent")] {
                                    td { a href=(format!("/admin/cars/{}/edit", p.id)) { (p.title) } }
                                    td { (fmt_datetime(p.sold_at)) }
                                    td { (p.remaining_text) }
                                }
                            }
                        }
                    }
                    form action="/admin/cars/cleanup" method="post" {
                        button type="submit" { "Run cleanup now" }
                    }
                }))
            }

            div class="two-col" {
                (card("Recent cars", html! {
                    table {
                        tbody {
                            @for car in &vm.recent_cars {
                                tr {
                                    td { a href=(format!("/admin/cars/{}/edit", car.id)) { (car.title) } }
                                    td { (format_price(car.price)) }
                                    td { (status_badge(car.status, car.status.label())) }
                                }
                            }
                        }
                    }
                    a href="/admin/cars/new" { "+ Add a car" }
                }))

                (card("Recent leads", html! {
                    @if vm.recent_leads.is_empty() {
                        p class="muted" { "No leads yet." }
                    }
                    ul class="plain" {
                        @for lead in &vm.recent_leads {
                            li {
                                strong { (lead.name) }
                                @if let Some(title) = &lead.car_title { " · " (title) }
                                br;
                                span class="muted" { (fmt_datetime(lead.created_at)) }
                            }
                        }
                    }
                    a href="/admin/leads" { "All leads →" }
                }))
            }
        },
    )
}
