// src/domain/inventory.rs

use crate::domain::car::{BodyType, Car, Condition, FuelType, Transmission};

pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    MileageAsc,
}

impl SortOrder {
    pub const ALL: &'static [SortOrder] = &[
        SortOrder::Newest,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::MileageAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::MileageAsc => "mileage_asc",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "price_asc" => SortOrder::PriceAsc,
            "price_desc" => SortOrder::PriceDesc,
            "mileage_asc" => SortOrder::MileageAsc,
            _ => SortOrder::Newest,
        }
    }
}

/// Catalog filters as they arrive in the query string.
/// Unknown or `all` values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryQuery {
    pub search: Option<String>,
    pub brand: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub body_type: Option<BodyType>,
    pub condition: Option<Condition>,
    pub max_price: Option<i64>,
    pub max_mileage: Option<i64>,
    pub sort: SortOrder,
    pub page: usize,
}

impl InventoryQuery {
    /// Build from decoded query pairs. Bad numbers are ignored, not errors.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.trim())
                .filter(|v| !v.is_empty() && *v != "all")
        };

        InventoryQuery {
            search: get("q").map(str::to_string),
            brand: get("brand").map(str::to_string),
            fuel_type: get("fuel").and_then(FuelType::parse),
            transmission: get("transmission").and_then(Transmission::parse),
            body_type: get("body").and_then(BodyType::parse),
            condition: get("condition").and_then(Condition::parse),
            max_price: get("max_price").and_then(|v| v.parse().ok()),
            max_mileage: get("max_mileage").and_then(|v| v.parse().ok()),
            sort: get("sort").map(SortOrder::parse).unwrap_or_default(),
            page: get("page").and_then(|v| v.parse().ok()).unwrap_or(1),
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.search.is_some()
            || self.brand.is_some()
            || self.fuel_type.is_some()
            || self.transmission.is_some()
            || self.body_type.is_some()
            || self.condition.is_some()
            || self.max_price.is_some()
            || self.max_mileage.is_some()
    }

    fn matches(&self, car: &Car) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = car.title.to_lowercase().contains(&term)
                || car.brand.to_lowercase().contains(&term)
                || car.model.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if &car.brand != brand {
                return false;
            }
        }
        if self.fuel_type.is_some_and(|f| f != car.fuel_type) {
            return false;
        }
        if self.transmission.is_some_and(|t| t != car.transmission) {
            return false;
        }
        if self.body_type.is_some_and(|b| b != car.body_type) {
            return false;
        }
        if self.condition.is_some_and(|c| c != car.condition) {
            return false;
        }
        if self.max_price.is_some_and(|max| car.price > max) {
            return false;
        }
        if self.max_mileage.is_some_and(|max| car.mileage > max) {
            return false;
        }
        true
    }

    /// Query string for the same filters on another page.
    pub fn to_query_string(&self, page: usize) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        if let Some(v) = &self.search {
            ser.append_pair("q", v);
        }
        if let Some(v) = &self.brand {
            ser.append_pair("brand", v);
        }
        if let Some(v) = self.fuel_type {
            ser.append_pair("fuel", v.as_str());
        }
        if let Some(v) = self.transmission {
            ser.append_pair("transmission", v.as_str());
        }
        if let Some(v) = self.body_type {
            ser.append_pair("body", v.as_str());
        }
        if let Some(v) = self.condition {
            ser.append_pair("condition", v.as_str());
        }
        if let Some(v) = self.max_price {
            ser.append_pair("max_price", &v.to_string());
        }
        if let Some(v) = self.max_mileage {
            ser.append_pair("max_mileage", &v.to_string());
        }
        if self.sort != SortOrder::Newest {
            ser.append_pair("sort", self.sort.as_str());
        }
        ser.append_pair("page", &page.to_string());
        ser.finish()
    }
}

/// One page of filtered, sorted cars.
#[derive(Debug)]
pub struct InventoryPage {
    pub cars: Vec<Car>,
    /// Matches across all pages.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Filter, sort (stable) and paginate. `cars` is expected newest-first.
pub fn apply(query: &InventoryQuery, cars: Vec<Car>) -> InventoryPage {
    let mut matched: Vec<Car> = cars.into_iter().filter(|c| query.matches(c)).collect();

    match query.sort {
        SortOrder::Newest => matched.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
        }),
        SortOrder::PriceAsc => matched.sort_by_key(|c| c.price),
        SortOrder::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::MileageAsc => matched.sort_by_key(|c| c.mileage),
    }

    let total = matched.len();
    let total_pages = total.div_ceil(PAGE_SIZE).max(1);
    let page = query.page.clamp(1, total_pages);

    let cars = matched
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    InventoryPage {
        cars,
        total,
        page,
        total_pages,
    }
}
