use crate::domain::car::{format_mileage, format_price, Car, CarStatus};
use crate::i18n::Locale;
use crate::spreadsheets::ImportSummary;
use crate::templates::admin_layout;
use crate::templates::components::status_badge;
use maud::{html, Markup, PreEscaped};

pub struct AdminCarsVm {
    pub cars: Vec<Car>,
    pub status_filter: Option<CarStatus>,
    pub import: Option<ImportSummary>,
    pub swept: Option<usize>,
}

// Loads the chosen file into the textarea so the form stays urlencoded.
const CSV_FILE_SCRIPT: &str = r#"
document.getElementById('csv-file').addEventListener('change', function (e) {
  var f = e.target.files[0];
  if (!f) return;
  var r = new FileReader();
  r.onload = function () { document.getElementById('csv-text').value = r.result; };
  r.readAsText(f);
});
"#;

fn status_tabs(current: Option<CarStatus>) -> Markup {
    html! {
        nav class="tabs" {
            a href="/admin/cars" class=[current.is_none().then_some("active")] { "All" }
            @for s in CarStatus::ALL {
                a href=(format!("/admin/cars?status={}", s.as_str()))
                  class=[(current == Some(*s)).then_some("active")] { (s.label()) }
            }
        }
    }
}

fn quick_status(car: &Car) -> Markup {
    html! {
        form class="inline" action=(format!("/admin/cars/{}/status", car.id)) method="post" {
            select name="status" {
                @for s in CarStatus::ALL {
                    option value=(s.as_str()) selected[*s == car.status] { (s.label()) }
                }
            }
            button type="submit" { "Set" }
        }
    }
}

pub fn admin_cars_page(vm: &AdminCarsVm) -> Markup {
    admin_layout(
        "Cars",
        "/admin/cars",
        html! {
            div class="page-head" {
                h1 { "Cars" }
                a class="btn primary" href="/admin/cars/new" { "+ New car" }
            }

            @if let Some(s) = vm.import {
                p class="alert" {
                    "Imported " (s.imported) " of " (s.total) " rows"
                    @if s.failed > 0 { ", " (s.failed) " failed" }
                    "."
                }
            }
            @if let Some(n) = vm.swept {
                p class="alert" { "Cleanup removed " (n) " sold car(s)." }
            }

            (status_tabs(vm.status_filter))

            table class="admin-table" {
                thead {
                    tr {
                        th { "Car" } th { "Price" } th { "Mileage" } th { "Status" }
                        th { "Featured" } th { "Quick status" } th {}
                    }
                }
                tbody {
                    @for car in &vm.cars {
                        tr {
                            td {
                                a href=(format!("/admin/cars/{}/edit", car.id)) { (car.title) }
                                br;
                                span class="muted" { (car.display_name()) " · " (car.short_id) }
                            }
                            td { (format_price(car.price)) }
                            td { (format_mileage(car.mileage)) }
                            td { (status_badge(car.status, car.status.label())) }
                            td { @if car.is_featured { "★" } }
                            td { (quick_status(car)) }
                            td class="actions" {
                                a href=(Locale::DEFAULT.href(&car.url())) target="_blank" { "View" }
                                form class="inline" action=(format!("/admin/cars/{}/delete", car.id)) method="post"
                                    onsubmit="return confirm('Delete this car?');" {
                                    button type="submit" class="danger" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
            @if vm.cars.is_empty() {
                p class="muted" { "No cars here." }
            }

            section class="card" {
                h3 { "Import / export" }
                p {
                    a class="btn" href="/admin/cars/export.csv" { "Export CSV" }
                    " "
                    a class="btn" href="/admin/cars/export.xlsx" { "Export XLSX" }
                }
                form action="/admin/cars/import" method="post" {
                    label { "CSV file" input type="file" id="csv-file" accept=".csv,text/csv"; }
                    label { "or paste CSV" textarea id="csv-text" name="csv" rows="6" {} }
                    button type="submit" class="primary" { "Import" }
                }
                script { (PreEscaped(CSV_FILE_SCRIPT)) }
            }
        },
    )
}
