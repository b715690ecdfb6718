// src/db/leads.rs
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::db::cars::get_car;
use crate::domain::lead::{BodyShopLead, BodyShopLeadInput, Lead, LeadInput};
use crate::errors::ServerError;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    pub total: i64,
    pub unhandled: i64,
    pub bodyshop_total: i64,
    pub bodyshop_unhandled: i64,
}

fn empty_to_none(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn lead_from_row(row: &Row) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        message: row.get(4)?,
        car_id: row.get(5)?,
        car_title: row.get(6)?,
        handled: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn bodyshop_lead_from_row(row: &Row) -> rusqlite::Result<BodyShopLead> {
    Ok(BodyShopLead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        chassis_number: row.get(4)?,
        service_type: row.get(5)?,
        message: row.get(6)?,
        handled: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Store an inquiry. A `car_id` must point at an existing car.
/// Honeypot screening is the caller's job.
pub fn insert_lead(conn: &Connection, input: &LeadInput, now: i64) -> Result<i64, ServerError> {
    if let Some(car_id) = input.car_id {
        if get_car(conn, car_id)?.is_none() {
            return Err(ServerError::BadRequest("unknown vehicle".into()));
        }
    }

    conn.execute(
        "insert into leads (name, email, phone, message, car_id, created_at)
         values (?, ?, ?, ?, ?, ?)",
        params![
            input.name.trim(),
            input.email.trim(),
            empty_to_none(&input.phone),
            input.message.trim(),
            input.car_id,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert lead failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Newest first, with the referenced car's title when it still exists.
pub fn list_leads(
    conn: &Connection,
    handled: Option<bool>,
    limit: Option<usize>,
) -> Result<Vec<Lead>, ServerError> {
    let mut sql = String::from(
        "select l.id, l.name, l.email, l.phone, l.message, l.car_id, c.title, l.handled, l.created_at
         from leads l
         left join cars c on c.id = l.car_id",
    );
    let mut bind: Vec<Value> = Vec::new();
    if let Some(h) = handled {
        sql.push_str(" where l.handled = ?");
        bind.push(Value::Integer(h as i64));
    }
    sql.push_str(" order by l.created_at desc, l.id desc");
    if let Some(limit) = limit {
        sql.push_str(" limit ?");
        bind.push(Value::Integer(limit as i64));
    }

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare leads query failed: {e}")))?;
    let rows = stmt
        .query_map(params_from_iter(bind), lead_from_row)
        .map_err(|e| ServerError::DbError(format!("leads query failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn set_lead_handled(conn: &Connection, id: i64, handled: bool) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update leads set handled = ? where id = ?",
            params![handled, id],
        )
        .map_err(|e| ServerError::DbError(format!("update lead failed: {e}")))?;
    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete_lead(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from leads where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete lead failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn insert_bodyshop_lead(
    conn: &Connection,
    input: &BodyShopLeadInput,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert into bodyshop_leads
            (name, email, phone, chassis_number, service_type, message, created_at)
         values (?, ?, ?, ?, ?, ?, ?)",
        params![
            input.name.trim(),
            input.email.trim(),
            input.phone.trim(),
            input.chassis_number.trim().to_uppercase(),
            input.service_type.trim(),
            empty_to_none(&input.message),
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert body-shop lead failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn list_bodyshop_leads(
    conn: &Connection,
    handled: Option<bool>,
) -> Result<Vec<BodyShopLead>, ServerError> {
    let mut sql = String::from(
        "select id, name, email, phone, chassis_number, service_type, message, handled, created_at
         from bodyshop_leads",
    );
    let mut bind: Vec<Value> = Vec::new();
    if let Some(h) = handled {
        sql.push_str(" where handled = ?");
        bind.push(Value::Integer(h as i64));
    }
    sql.push_str(" order by created_at desc, id desc");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare body-shop query failed: {e}")))?;
    let rows = stmt
        .query_map(params_from_iter(bind), bodyshop_lead_from_row)
        .map_err(|e| ServerError::DbError(format!("body-shop query failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn set_bodyshop_lead_handled(
    conn: &Connection,
    id: i64,
    handled: bool,
) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update bodyshop_leads set handled = ? where id = ?",
            params![handled, id],
        )
        .map_err(|e| ServerError::DbError(format!("update body-shop lead failed: {e}")))?;
    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete_bodyshop_lead(conn: &Connection, id: i64) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from bodyshop_leads where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete body-shop lead failed: {e}")))?;
    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn lead_stats(conn: &Connection) -> Result<LeadStats, ServerError> {
    conn.query_row(
        r#"
        select
            (select count(*) from leads),
            (select count(*) from leads where handled = 0),
            (select count(*) from bodyshop_leads),
            (select count(*) from bodyshop_leads where handled = 0)
        "#,
        [],
        |r| {
            Ok(LeadStats {
                total: r.get(0)?,
                unhandled: r.get(1)?,
                bodyshop_total: r.get(2)?,
                bodyshop_unhandled: r.get(3)?,
            })
        },
    )
    .map_err(|e| ServerError::DbError(format!("lead stats failed: {e}")))
}
