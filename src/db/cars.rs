// src/db/cars.rs
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::domain::car::{
    generate_short_id, sold_at_after, BodyType, Car, CarInput, CarStatus, Condition, FuelType,
    Transmission,
};
use crate::domain::expiry::{self, PendingDeletion};
use crate::errors::ServerError;

const CAR_COLUMNS: &str = "id, short_id, slug, title, brand, model, year, price, mileage,
    fuel_type, transmission, body_type, condition, color_exterior, color_interior,
    power_hp, engine, drivetrain, seats, doors, features, description, images,
    car_pass_url, is_featured, status, sold_at, created_at, updated_at";

const SHORT_ID_ATTEMPTS: usize = 5;

/// Optional narrowing for admin/API listings.
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    pub status: Option<CarStatus>,
    pub featured: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CarStats {
    pub total: i64,
    pub available: i64,
    pub reserved: i64,
    pub sold: i64,
    pub featured: i64,
}

fn enum_column<T>(row: &Row, idx: usize, parse: fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unexpected value {raw:?}").into(),
        )
    })
}

fn list_column(row: &Row, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn car_from_row(row: &Row) -> rusqlite::Result<Car> {
    Ok(Car {
        id: row.get(0)?,
        short_id: row.get(1)?,
        slug: row.get(2)?,
        title: row.get(3)?,
        brand: row.get(4)?,
        model: row.get(5)?,
        year: row.get(6)?,
        price: row.get(7)?,
        mileage: row.get(8)?,
        fuel_type: enum_column(row, 9, FuelType::parse)?,
        transmission: enum_column(row, 10, Transmission::parse)?,
        body_type: enum_column(row, 11, BodyType::parse)?,
        condition: enum_column(row, 12, Condition::parse)?,
        color_exterior: row.get(13)?,
        color_interior: row.get(14)?,
        power_hp: row.get(15)?,
        engine: row.get(16)?,
        drivetrain: row.get(17)?,
        seats: row.get(18)?,
        doors: row.get(19)?,
        features: list_column(row, 20)?,
        description: row.get(21)?,
        images: list_column(row, 22)?,
        car_pass_url: row.get(23)?,
        is_featured: row.get(24)?,
        status: enum_column(row, 25, CarStatus::parse)?,
        sold_at: row.get(26)?,
        created_at: row.get(27)?,
        updated_at: row.get(28)?,
    })
}

fn to_json(list: &[String]) -> Result<String, ServerError> {
    serde_json::to_string(list).map_err(|_| ServerError::InternalError)
}

fn query_cars(conn: &Connection, sql: &str, bind: Vec<Value>) -> Result<Vec<Car>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(format!("prepare cars query failed: {e}")))?;

    let rows = stmt
        .query_map(params_from_iter(bind), car_from_row)
        .map_err(|e| ServerError::DbError(format!("cars query failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read car row failed: {e}")))?);
    }
    Ok(out)
}

pub fn get_car(conn: &Connection, id: i64) -> Result<Option<Car>, ServerError> {
    conn.query_row(
        &format!("select {CAR_COLUMNS} from cars where id = ?"),
        params![id],
        car_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select car failed: {e}")))
}

pub fn get_car_by_short_id(conn: &Connection, short_id: &str) -> Result<Option<Car>, ServerError> {
    conn.query_row(
        &format!("select {CAR_COLUMNS} from cars where short_id = ?"),
        params![short_id],
        car_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select car by short id failed: {e}")))
}

fn short_id_taken(conn: &Connection, short_id: &str) -> Result<bool, ServerError> {
    conn.query_row(
        "select exists(select 1 from cars where short_id = ?)",
        params![short_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("short id lookup failed: {e}")))
}

fn fresh_short_id(conn: &Connection) -> Result<String, ServerError> {
    for _ in 0..SHORT_ID_ATTEMPTS {
        let candidate = generate_short_id();
        if !short_id_taken(conn, &candidate)? {
            return Ok(candidate);
        }
    }
    Err(ServerError::DbError("could not allocate a unique short id".into()))
}

/// Validate and insert a new car. Sold cars get `sold_at = now`.
pub fn insert_car(conn: &Connection, input: &CarInput, now: i64) -> Result<Car, ServerError> {
    input.check(now)?;
    write_new_car(conn, input, now)
}

/// Insert a CSV row. Imports only require brand, model, title and year,
/// which the caller has already checked.
pub fn import_car(conn: &Connection, input: &CarInput, now: i64) -> Result<Car, ServerError> {
    write_new_car(conn, input, now)
}

fn write_new_car(conn: &Connection, input: &CarInput, now: i64) -> Result<Car, ServerError> {
    let short_id = fresh_short_id(conn)?;
    let sold_at = sold_at_after(None, input.status, now);

    conn.execute(
        r#"
        insert into cars (
            short_id, slug, title, brand, model, year, price, mileage,
            fuel_type, transmission, body_type, condition, color_exterior, color_interior,
            power_hp, engine, drivetrain, seats, doors, features, description, images,
            car_pass_url, is_featured, status, sold_at, created_at, updated_at
        ) values (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
            ?9, ?10, ?11, ?12, ?13, ?14,
            ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22,
            ?23, ?24, ?25, ?26, ?27, ?27
        )
        "#,
        params![
            short_id,
            input.slug(),
            input.title,
            input.brand,
            input.model,
            input.year,
            input.price,
            input.mileage,
            input.fuel_type.as_str(),
            input.transmission.as_str(),
            input.body_type.as_str(),
            input.condition.as_str(),
            input.color_exterior,
            input.color_interior,
            input.power_hp,
            input.engine,
            input.drivetrain,
            input.seats,
            input.doors,
            to_json(&input.features)?,
            input.description,
            to_json(&input.images)?,
            input.car_pass_url,
            input.is_featured,
            input.status.as_str(),
            sold_at,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert car failed: {e}")))?;

    let id = conn.last_insert_rowid();
    get_car(conn, id)?.ok_or(ServerError::InternalError)
}

/// Full edit. The short id is kept, the slug follows the new details.
pub fn update_car(
    conn: &Connection,
    id: i64,
    input: &CarInput,
    now: i64,
) -> Result<Car, ServerError> {
    input.check(now)?;

    let current = get_car(conn, id)?.ok_or(ServerError::NotFound)?;
    let sold_at = sold_at_after(Some((current.status, current.sold_at)), input.status, now);

    conn.execute(
        r#"
        update cars set
            slug = ?1, title = ?2, brand = ?3, model = ?4, year = ?5, price = ?6,
            mileage = ?7, fuel_type = ?8, transmission = ?9, body_type = ?10,
            condition = ?11, color_exterior = ?12, color_interior = ?13, power_hp = ?14,
            engine = ?15, drivetrain = ?16, seats = ?17, doors = ?18, features = ?19,
            description = ?20, images = ?21, car_pass_url = ?22, is_featured = ?23,
            status = ?24, sold_at = ?25, updated_at = ?26
        where id = ?27
        "#,
        params![
            input.slug(),
            input.title,
            input.brand,
            input.model,
            input.year,
            input.price,
            input.mileage,
            input.fuel_type.as_str(),
            input.transmission.as_str(),
            input.body_type.as_str(),
            input.condition.as_str(),
            input.color_exterior,
            input.color_interior,
            input.power_hp,
            input.engine,
            input.drivetrain,
            input.seats,
            input.doors,
            to_json(&input.features)?,
            input.description,
            to_json(&input.images)?,
            input.car_pass_url,
            input.is_featured,
            input.status.as_str(),
            sold_at,
            now,
            id,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("update car failed: {e}")))?;

    get_car(conn, id)?.ok_or(ServerError::NotFound)
}

/// Quick status change from the admin list.
pub fn set_status(
    conn: &Connection,
    id: i64,
    status: CarStatus,
    now: i64,
) -> Result<Car, ServerError> {
    let current = get_car(conn, id)?.ok_or(ServerError::NotFound)?;
    let sold_at = sold_at_after(Some((current.status, current.sold_at)), status, now);

    conn.execute(
        "update cars set status = ?, sold_at = ?, updated_at = ? where id = ?",
        params![status.as_str(), sold_at, now, id],
    )
    .map_err(|e| ServerError::DbError(format!("update car status failed: {e}")))?;

    get_car(conn, id)?.ok_or(ServerError::NotFound)
}

pub fn delete_car(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from cars where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete car failed: {e}")))?;

    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

fn placeholders(n: usize) -> String {
    std::iter::repeat("?").take(n).collect::<Vec<_>>().join(", ")
}

/// Newest first, optionally narrowed by status / featured flag.
pub fn list_cars(conn: &Connection, filter: &CarFilter) -> Result<Vec<Car>, ServerError> {
    let mut clauses: Vec<String> = Vec::new();
    let mut bind: Vec<Value> = Vec::new();

    if let Some(status) = filter.status {
        clauses.push("status = ?".into());
        bind.push(Value::Text(status.as_str().to_string()));
    }
    if let Some(featured) = filter.featured {
        clauses.push("is_featured = ?".into());
        bind.push(Value::Integer(featured as i64));
    }

    let mut sql = format!("select {CAR_COLUMNS} from cars");
    if !clauses.is_empty() {
        sql.push_str(" where ");
        sql.push_str(&clauses.join(" and "));
    }
    sql.push_str(" order by created_at desc, id desc");
    if let Some(limit) = filter.limit {
        sql.push_str(" limit ?");
        bind.push(Value::Integer(limit as i64));
    }

    query_cars(conn, &sql, bind)
}

/// Cars shown on the public site (available and reserved).
pub fn list_listed_cars(conn: &Connection) -> Result<Vec<Car>, ServerError> {
    let listed: Vec<Value> = CarStatus::ALL
        .iter()
        .filter(|s| s.is_listed())
        .map(|s| Value::Text(s.as_str().to_string()))
        .collect();

    let sql = format!(
        "select {CAR_COLUMNS} from cars where status in ({}) order by created_at desc, id desc",
        placeholders(listed.len())
    );
    query_cars(conn, &sql, listed)
}

pub fn featured_cars(conn: &Connection, limit: usize) -> Result<Vec<Car>, ServerError> {
    list_cars(
        conn,
        &CarFilter {
            status: Some(CarStatus::Available),
            featured: Some(true),
            limit: Some(limit),
        },
    )
}

/// Available cars sharing the brand or the body type.
pub fn similar_cars(conn: &Connection, car: &Car, limit: usize) -> Result<Vec<Car>, ServerError> {
    let sql = format!(
        "select {CAR_COLUMNS} from cars
         where (brand = ? or body_type = ?) and id != ? and status = ?
         order by created_at desc, id desc
         limit ?"
    );
    query_cars(
        conn,
        &sql,
        vec![
            Value::Text(car.brand.clone()),
            Value::Text(car.body_type.as_str().to_string()),
            Value::Integer(car.id),
            Value::Text(CarStatus::Available.as_str().to_string()),
            Value::Integer(limit as i64),
        ],
    )
}

/// Distinct brands, alphabetical. `listed_only` restricts to the public catalog.
pub fn brands(conn: &Connection, listed_only: bool) -> Result<Vec<String>, ServerError> {
    let sql = if listed_only {
        "select distinct brand from cars where status in ('available', 'reserved') order by brand"
    } else {
        "select distinct brand from cars order by brand"
    };

    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let rows = stmt
        .query_map([], |r| r.get::<_, String>(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn car_stats(conn: &Connection) -> Result<CarStats, ServerError> {
    conn.query_row(
        r#"
        select
            count(*),
            coalesce(sum(status = 'available'), 0),
            coalesce(sum(status = 'reserved'), 0),
            coalesce(sum(status = 'sold'), 0),
            coalesce(sum(is_featured = 1), 0)
        from cars
        "#,
        [],
        |r| {
            Ok(CarStats {
                total: r.get(0)?,
                available: r.get(1)?,
                reserved: r.get(2)?,
                sold: r.get(3)?,
                featured: r.get(4)?,
            })
        },
    )
    .map_err(|e| ServerError::DbError(format!("car stats failed: {e}")))
}

/// Delete sold cars whose sale is older than the retention window.
/// Returns how many rows went away.
pub fn sweep_expired_sold_cars(
    conn: &Connection,
    now: i64,
    retention_secs: i64,
) -> Result<usize, ServerError> {
    conn.execute(
        "delete from cars where status = 'sold' and sold_at is not null and sold_at <= ?",
        params![expiry::cutoff(now, retention_secs)],
    )
    .map_err(|e| ServerError::DbError(format!("sold car sweep failed: {e}")))
}

/// Sold cars with a sale timestamp, oldest sale first, with their countdown.
pub fn pending_deletions(
    conn: &Connection,
    now: i64,
    retention_secs: i64,
) -> Result<Vec<PendingDeletion>, ServerError> {
    let sql = format!(
        "select {CAR_COLUMNS} from cars
         where status = 'sold' and sold_at is not null
         order by sold_at asc, id asc"
    );
    let cars = query_cars(conn, &sql, Vec::new())?;

    Ok(cars
        .iter()
        .filter_map(|car| expiry::pending_deletion(car, now, retention_secs))
        .collect())
}
