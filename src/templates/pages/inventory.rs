use crate::domain::car::{BodyType, Condition, FuelType, Transmission};
use crate::domain::inventory::{InventoryPage, InventoryQuery, SortOrder};
use crate::templates::components::pagination;
use crate::templates::{car_card, desktop_layout, PageCtx};
use maud::{html, Markup};

pub struct InventoryVm<'a> {
    pub ctx: PageCtx<'a>,
    pub query: &'a InventoryQuery,
    pub page: InventoryPage,
    pub brands: Vec<String>,
}

fn enum_select(ctx: &PageCtx, name: &str, label: &str, values: &[&str], current: Option<&str>) -> Markup {
    html! {
        label {
            (label)
            select name=(name) {
                option value="all" { (ctx.t().all) }
                @for v in values {
                    option value=(v) selected[current == Some(*v)] { (v) }
                }
            }
        }
    }
}

fn filter_form(vm: &InventoryVm) -> Markup {
    let ctx = &vm.ctx;
    let t = ctx.t();
    let q = vm.query;
    let fuels: Vec<&str> = FuelType::ALL.iter().map(|v| v.as_str()).collect();
    let gearboxes: Vec<&str> = Transmission::ALL.iter().map(|v| v.as_str()).collect();
    let bodies: Vec<&str> = BodyType::ALL.iter().map(|v| v.as_str()).collect();
    let conditions: Vec<&str> = Condition::ALL.iter().map(|v| v.as_str()).collect();

    html! {
        form class="filters" action=(ctx.href("/cars")) method="get" {
            label {
                (t.search)
                input type="search" name="q" value=(q.search.as_deref().unwrap_or("")) placeholder=(t.search_placeholder);
            }
            label {
                (t.brand)
                select name="brand" {
                    option value="all" { (t.all_brands) }
                    @for b in &vm.brands {
                        option value=(b) selected[q.brand.as_deref() == Some(b.as_str())] { (b) }
                    }
                }
            }
            (enum_select(ctx, "fuel", t.fuel, &fuels, q.fuel_type.map(|v| v.as_str())))
            (enum_select(ctx, "transmission", t.transmission, &gearboxes, q.transmission.map(|v| v.as_str())))
            (enum_select(ctx, "body", t.body, &bodies, q.body_type.map(|v| v.as_str())))
            (enum_select(ctx, "condition", t.condition, &conditions, q.condition.map(|v| v.as_str())))
            label {
                (t.max_price)
                input type="number" name="max_price" min="0" step="500" value=[q.max_price];
            }
            label {
                (t.max_mileage)
                input type="number" name="max_mileage" min="0" step="1000" value=[q.max_mileage];
            }
            label {
                (t.sort)
                select name="sort" {
                    @for order in SortOrder::ALL {
                        option value=(order.as_str()) selected[q.sort == *order] { (t.sort_label(*order)) }
                    }
                }
            }
            button type="submit" class="primary" { (t.apply) }
            @if q.is_filtered() {
                a href=(ctx.href("/cars")) { (t.reset_filters) }
            }
        }
    }
}

pub fn inventory_page(vm: &InventoryVm) -> Markup {
    let ctx = &vm.ctx;
    let t = ctx.t();
    let page = &vm.page;

    desktop_layout(
        ctx,
        t.inventory_title,
        html! {
            main class="container" {
                h1 { (t.inventory_heading) }
                (filter_form(vm))

                p class="muted" {
                    (page.total) " " (t.cars_found)
                    @if page.total_pages > 1 {
                        " · " (t.page) " " (page.page) " " (t.of) " " (page.total_pages)
                    }
                }

                @if page.cars.is_empty() {
                    p { (t.no_matches) }
                } @else {
                    div class="car-grid" {
                        @for car in &page.cars {
                            (car_card(ctx, car))
                        }
                    }
                }

                (pagination(ctx, vm.query, page.page, page.total_pages))
            }
        },
    )
}
