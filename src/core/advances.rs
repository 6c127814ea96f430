//! Cash advance ledger: request → approve/reject/cancel → incremental
//! repayments posted by payroll runs.

use crate::config::Config;
use crate::core::events::{self, DomainEvent};
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::advance::{AdvanceStatus, CashAdvance};
use crate::utils::money::round2;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RequestCheck {
    pub can_request: bool,
    pub reason: Option<String>,
    pub outstanding: f64,
}

/// Combined unpaid balance across all approved advances.
pub fn outstanding_balance(conn: &Connection, employee_id: i64) -> AppResult<f64> {
    let open = db::advances::list_outstanding(conn, employee_id)?;
    Ok(round2(open.iter().map(|a| a.remaining_balance).sum()))
}

/// Policy check: the employee's combined outstanding balance plus the
/// new request must stay within their advance limit.
pub fn can_request(
    pool: &mut DbPool,
    cfg: &Config,
    employee_id: i64,
    amount: f64,
) -> AppResult<RequestCheck> {
    let employee = db::employees::find(&pool.conn, employee_id)?;
    let outstanding = outstanding_balance(&pool.conn, employee_id)?;
    let limit = cfg.advance_limit_for(employee.advance_limit);

    if outstanding + amount > limit {
        return Ok(RequestCheck {
            can_request: false,
            reason: Some(format!(
                "outstanding balance {:.2} plus requested {:.2} exceeds the {:.2} limit",
                outstanding, amount, limit
            )),
            outstanding,
        });
    }

    Ok(RequestCheck {
        can_request: true,
        reason: None,
        outstanding,
    })
}

pub fn request(
    pool: &mut DbPool,
    cfg: &Config,
    employee_id: i64,
    amount: f64,
    purpose: &str,
    request_date: NaiveDate,
) -> AppResult<CashAdvance> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::Validation(format!(
            "advance amount must be positive, got {}",
            amount
        )));
    }

    let check = can_request(pool, cfg, employee_id, amount)?;
    if !check.can_request {
        return Err(AppError::Policy(
            check.reason.unwrap_or_else(|| "advance limit exceeded".to_string()),
        ));
    }

    let id = db::advances::insert(&pool.conn, employee_id, round2(amount), purpose, request_date)?;
    db::log::audit(
        &pool.conn,
        "advance_requested",
        &format!("advance {}", id),
        &format!("employee {} requested {:.2}: {}", employee_id, amount, purpose),
    )?;
    db::advances::find(&pool.conn, id)
}

/// Status transition guard: Pending is the only valid predecessor for
/// approve, reject and cancel.
fn require_pending(advance: &CashAdvance, action: &str) -> AppResult<()> {
    if advance.status != AdvanceStatus::Pending {
        return Err(AppError::Policy(format!(
            "cannot {} advance {}: status is {}, not Pending",
            action,
            advance.id,
            advance.status.label()
        )));
    }
    Ok(())
}

pub fn approve(pool: &mut DbPool, id: i64, actor: &str) -> AppResult<CashAdvance> {
    let advance = db::advances::find(&pool.conn, id)?;
    require_pending(&advance, "approve")?;

    db::advances::update_status(&pool.conn, id, AdvanceStatus::Approved, Some(actor))?;
    let advance = db::advances::find(&pool.conn, id)?;

    db::log::audit(
        &pool.conn,
        "advance_approved",
        &format!("advance {}", id),
        &format!("approved by {}", actor),
    )?;
    events::emit(&pool.conn, DomainEvent::CashAdvanceApproved { advance: &advance })?;

    Ok(advance)
}

pub fn reject(pool: &mut DbPool, id: i64, actor: &str) -> AppResult<CashAdvance> {
    let advance = db::advances::find(&pool.conn, id)?;
    require_pending(&advance, "reject")?;

    db::advances::update_status(&pool.conn, id, AdvanceStatus::Rejected, Some(actor))?;
    db::log::audit(
        &pool.conn,
        "advance_rejected",
        &format!("advance {}", id),
        &format!("rejected by {}", actor),
    )?;
    db::advances::find(&pool.conn, id)
}

pub fn cancel(pool: &mut DbPool, id: i64) -> AppResult<CashAdvance> {
    let advance = db::advances::find(&pool.conn, id)?;
    require_pending(&advance, "cancel")?;

    db::advances::update_status(&pool.conn, id, AdvanceStatus::Cancelled, None)?;
    db::log::audit(
        &pool.conn,
        "advance_cancelled",
        &format!("advance {}", id),
        "cancelled by requester",
    )?;
    db::advances::find(&pool.conn, id)
}

/// Post a repayment against an approved advance. Fails without side
/// effects when the payment exceeds the remaining balance.
pub fn add_payment(
    conn: &Connection,
    advance_id: i64,
    amount: f64,
    payroll_id: i64,
    date: NaiveDate,
) -> AppResult<()> {
    let advance = db::advances::find(conn, advance_id)?;

    if advance.status != AdvanceStatus::Approved {
        return Err(AppError::Policy(format!(
            "cannot post a payment against advance {}: status is {}, not Approved",
            advance_id,
            advance.status.label()
        )));
    }
    if amount > advance.remaining_balance {
        return Err(AppError::Overpayment {
            attempted: amount,
            remaining: advance.remaining_balance,
        });
    }

    db::advances::insert_payment(conn, advance_id, round2(amount), payroll_id, date)?;
    db::log::audit(
        conn,
        "advance_payment",
        &format!("advance {}", advance_id),
        &format!("payment {:.2} from payroll {}", amount, payroll_id),
    )?;
    Ok(())
}
