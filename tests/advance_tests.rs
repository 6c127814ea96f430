mod common;
use common::{date, open_pool, seed_employee, setup_test_db};
use sweldo::config::Config;
use sweldo::core::advances;
use sweldo::errors::AppError;
use sweldo::models::advance::AdvanceStatus;

#[test]
fn pending_advances_do_not_count_as_outstanding() {
    let db = setup_test_db("adv_pending");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    advances::request(&mut pool, &cfg, emp, 1000.0, "school fees", date("2025-06-02"))
        .expect("request");

    let outstanding = advances::outstanding_balance(&pool.conn, emp).expect("balance");
    assert_eq!(outstanding, 0.0);
}

#[test]
fn approval_moves_the_amount_into_the_outstanding_balance() {
    let db = setup_test_db("adv_approve");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    let adv = advances::request(&mut pool, &cfg, emp, 1000.0, "school fees", date("2025-06-02"))
        .expect("request");
    let adv = advances::approve(&mut pool, adv.id, "admin").expect("approve");

    assert_eq!(adv.status, AdvanceStatus::Approved);
    assert_eq!(adv.remaining_balance, 1000.0);
    assert_eq!(
        advances::outstanding_balance(&pool.conn, emp).expect("balance"),
        1000.0
    );
}

#[test]
fn requests_beyond_the_limit_are_rejected() {
    let db = setup_test_db("adv_limit");
    let mut pool = open_pool(&db);
    let cfg = Config::default(); // default limit 5000

    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");
    let adv = advances::request(&mut pool, &cfg, emp, 4000.0, "tuition", date("2025-06-02"))
        .expect("request");
    advances::approve(&mut pool, adv.id, "admin").expect("approve");

    // 4000 outstanding + 2000 requested > 5000
    let res = advances::request(&mut pool, &cfg, emp, 2000.0, "more", date("2025-06-03"));
    assert!(matches!(res, Err(AppError::Policy(_))));

    // A request that still fits goes through.
    advances::request(&mut pool, &cfg, emp, 1000.0, "fits", date("2025-06-03"))
        .expect("within limit");
}

#[test]
fn only_pending_advances_can_change_status() {
    let db = setup_test_db("adv_status_guard");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    let adv = advances::request(&mut pool, &cfg, emp, 500.0, "transport", date("2025-06-02"))
        .expect("request");
    advances::reject(&mut pool, adv.id, "admin").expect("reject");

    assert!(matches!(
        advances::approve(&mut pool, adv.id, "admin"),
        Err(AppError::Policy(_))
    ));
    assert!(matches!(
        advances::cancel(&mut pool, adv.id),
        Err(AppError::Policy(_))
    ));
}

#[test]
fn overpayment_is_rejected_and_leaves_the_balance_unchanged() {
    let db = setup_test_db("adv_overpay");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    let adv = advances::request(&mut pool, &cfg, emp, 1000.0, "tuition", date("2025-06-02"))
        .expect("request");
    advances::approve(&mut pool, adv.id, "admin").expect("approve");

    advances::add_payment(&pool.conn, adv.id, 600.0, 1, date("2025-06-07")).expect("first payment");

    let res = advances::add_payment(&pool.conn, adv.id, 500.0, 2, date("2025-06-14"));
    assert!(matches!(res, Err(AppError::Overpayment { .. })));

    assert_eq!(
        advances::outstanding_balance(&pool.conn, emp).expect("balance"),
        400.0
    );
}

#[test]
fn payments_against_non_approved_advances_are_rejected() {
    let db = setup_test_db("adv_pay_pending");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    let adv = advances::request(&mut pool, &cfg, emp, 1000.0, "tuition", date("2025-06-02"))
        .expect("request");

    let res = advances::add_payment(&pool.conn, adv.id, 100.0, 1, date("2025-06-07"));
    assert!(matches!(res, Err(AppError::Policy(_))));
}

#[test]
fn fully_repaid_advances_drop_out_of_the_outstanding_set() {
    let db = setup_test_db("adv_repaid");
    let mut pool = open_pool(&db);
    let cfg = Config::default();
    let emp = seed_employee(&pool, "Maria Santos", "2025-01-06");

    let adv = advances::request(&mut pool, &cfg, emp, 800.0, "tuition", date("2025-06-02"))
        .expect("request");
    advances::approve(&mut pool, adv.id, "admin").expect("approve");
    advances::add_payment(&pool.conn, adv.id, 800.0, 1, date("2025-06-07")).expect("payment");

    assert_eq!(
        advances::outstanding_balance(&pool.conn, emp).expect("balance"),
        0.0
    );
    let open = sweldo::db::advances::list_outstanding(&pool.conn, emp).expect("outstanding");
    assert!(open.is_empty());
}
