// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use shiftbook::models::MainCategory;
use shiftbook::commands::{purchases, revenue};
use shiftbook::{cli, commands::transactions, db::init_schema};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(date, main_category, subcategory, amount) VALUES (?1, 'expense', 'Gas', '10')",
            params![format!("2025-01-0{}", i)],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO transactions(date, main_category, subcategory, amount) VALUES ('2025-02-01', 'income', 'Tips', '5')",
        [],
    )
    .unwrap();
    conn
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<shiftbook::models::Transaction> {
    let mut argv = vec!["shiftbook", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m).unwrap();
        }
        panic!("no list subcommand");
    }
    panic!("no tx subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = list_rows(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 2, 1));
    assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2025, 1, 3));
}

#[test]
fn list_filters_by_month_and_kind() {
    let conn = setup();
    let jan = list_rows(&conn, &["--month", "2025-01"]);
    assert_eq!(jan.len(), 3);

    let income = list_rows(&conn, &["--kind", "income"]);
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].main_category, MainCategory::Income);
    assert_eq!(income[0].subcategory, "Tips");
}

#[test]
fn add_then_remove_through_handle() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "shiftbook",
        "tx",
        "add",
        "--date",
        "2025-03-01",
        "--kind",
        "expense",
        "--subcategory",
        "Water",
        "--amount",
        "750",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();
    let rows = list_rows(&conn, &["--month", "2025-03"]);
    assert_eq!(rows.len(), 1);
    let id = rows[0].id.to_string();

    let matches = cli::build_cli().get_matches_from(["shiftbook", "tx", "rm", id.as_str()]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();
    assert!(list_rows(&conn, &["--month", "2025-03"]).is_empty());

    // second removal of the same id reports it missing
    assert!(transactions::handle(&conn, tx_m).is_err());
}

#[test]
fn add_rejects_negative_amount_without_writing() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "shiftbook",
        "tx",
        "add",
        "--kind",
        "income",
        "--subcategory",
        "Tips",
        "--amount=-5",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&conn, tx_m).is_err());
    assert_eq!(list_rows(&conn, &[]).len(), 4);
}

#[test]
fn list_with_bad_month_is_an_error_not_an_empty_list() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["shiftbook", "tx", "list", "--month", "2025-13"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&conn, tx_m).is_err());

    for group in ["purchase", "revenue"] {
        let matches =
            cli::build_cli().get_matches_from(["shiftbook", group, "list", "--month", "2025-13"]);
        let Some((_, group_m)) = matches.subcommand() else {
            panic!("no {} subcommand", group);
        };
        let result = match group {
            "purchase" => purchases::handle(&conn, group_m),
            _ => revenue::handle(&conn, group_m),
        };
        assert!(result.is_err());
    }
}

#[test]
fn revenue_and_purchase_lists_narrow_by_month() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO revenue_entries(date, period, subcategory, amount) VALUES
            ('2025-01-06', 'morning', 'Beignets', '7000'),
            ('2025-02-06', 'evening', 'Soya', '9000');
        INSERT INTO purchases(date, item_name, quantity, unit, unit_price, total_price) VALUES
            ('2025-01-06', 'Flour', '3', 'kg', '500', '1500');
        "#,
    )
    .unwrap();
    let matches = cli::build_cli().get_matches_from([
        "shiftbook", "revenue", "list", "--period", "evening", "--month", "2025-02",
    ]);
    let Some(("revenue", rev_m)) = matches.subcommand() else {
        panic!("no revenue subcommand");
    };
    let Some(("list", list_m)) = rev_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = revenue::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].subcategory, "Soya");

    let matches =
        cli::build_cli().get_matches_from(["shiftbook", "purchase", "list", "--month", "2025-02"]);
    let Some(("purchase", p_m)) = matches.subcommand() else {
        panic!("no purchase subcommand");
    };
    let Some(("list", list_m)) = p_m.subcommand() else {
        panic!("no list subcommand");
    };
    assert!(purchases::query_rows(&conn, list_m).unwrap().is_empty());
}
