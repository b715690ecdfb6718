use crate::domain::inventory::InventoryQuery;
use crate::templates::PageCtx;
use maud::{html, Markup};

pub fn pagination(ctx: &PageCtx, query: &InventoryQuery, page: usize, total_pages: usize) -> Markup {
    let t = ctx.t();
    let base = ctx.href("/cars");
    let link = |p: usize| format!("{base}?{}", query.to_query_string(p));

    html! {
        @if total_pages > 1 {
            nav class="pagination" aria-label="Pages" {
                @if page > 1 {
                    a href=(link(page - 1)) { (t.previous) }
                }
                @for p in 1..=total_pages {
                    @if p == page {
                        span class="current" { (p) }
                    } @else {
                        a href=(link(p)) { (p) }
                    }
                }
                @if page < total_pages {
                    a href=(link(page + 1)) { (t.next) }
                }
            }
        }
    }
}
