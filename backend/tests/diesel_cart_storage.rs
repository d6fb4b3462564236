//! Integration tests for `DieselStorage` cart persistence.
//!
//! This suite runs against embedded PostgreSQL with the crate's migrations
//! applied, so the cart upsert and the unique constraint it targets are
//! exercised against a real schema.

use backend::domain::ports::{CartStore, StorageError, UserStore};
use backend::domain::NewUser;
use backend::outbound::persistence::{DbPool, DieselStorage, PoolConfig};
use futures_util::future::join_all;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{drop_table, handle_cluster_setup_failure, provision_database};

const PIZZA_ID: i32 = 1;
const PASTA_ID: i32 = 2;

struct TestContext {
    runtime: Runtime,
    storage: DieselStorage,
    user_id: i32,
    database_url: String,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_database()?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(database_url.as_str()).with_max_size(4);
    let storage = DieselStorage::new(DbPool::new(&config));

    let user = runtime
        .block_on(storage.create_user(&NewUser {
            name: "Cart Tester".to_owned(),
            email: "cart@example.com".to_owned(),
            password: "$argon2id$placeholder".to_owned(),
        }))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        storage,
        user_id: user.id,
        database_url,
        _database: database,
    })
}

#[fixture]
fn storage_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn adding_the_same_course_twice_accumulates_one_row(storage_context: Option<TestContext>) {
    let Some(context) = storage_context else {
        eprintln!("SKIP-TEST-CLUSTER: adding_the_same_course_twice_accumulates_one_row skipped");
        return;
    };

    context.runtime.block_on(async {
        context
            .storage
            .add_to_cart(context.user_id, PIZZA_ID, 1)
            .await
            .expect("first add");
        context
            .storage
            .add_to_cart(context.user_id, PIZZA_ID, 1)
            .await
            .expect("second add");

        let lines = context
            .storage
            .cart_for_user(context.user_id)
            .await
            .expect("list cart");

        assert_eq!(lines.len(), 1, "duplicate adds should collapse to one row");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].name, "Margherita Pizza");
        assert_eq!(lines[0].price, 299);
    });
}

#[rstest]
fn concurrent_adds_accumulate_without_losing_updates(storage_context: Option<TestContext>) {
    let Some(context) = storage_context else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_adds_accumulate_without_losing_updates skipped");
        return;
    };

    context.runtime.block_on(async {
        let adds = (0..4).map(|_| context.storage.add_to_cart(context.user_id, PIZZA_ID, 1));
        for result in join_all(adds).await {
            result.expect("concurrent add");
        }

        let lines = context
            .storage
            .cart_for_user(context.user_id)
            .await
            .expect("list cart");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 4, "every concurrent add should land");
    });
}

#[rstest]
fn cart_update_remove_and_clear_round_trip(storage_context: Option<TestContext>) {
    let Some(context) = storage_context else {
        eprintln!("SKIP-TEST-CLUSTER: cart_update_remove_and_clear_round_trip skipped");
        return;
    };

    context.runtime.block_on(async {
        context
            .storage
            .add_to_cart(context.user_id, PIZZA_ID, 1)
            .await
            .expect("add pizza");
        context
            .storage
            .add_to_cart(context.user_id, PASTA_ID, 1)
            .await
            .expect("add pasta");
        context
            .storage
            .set_quantity(context.user_id, PASTA_ID, 5)
            .await
            .expect("set quantity");

        let lines = context
            .storage
            .cart_for_user(context.user_id)
            .await
            .expect("list cart");
        assert_eq!(lines.len(), 2);
        let pasta = lines
            .iter()
            .find(|line| line.course_id == PASTA_ID)
            .expect("pasta line present");
        assert_eq!(pasta.quantity, 5);

        context
            .storage
            .remove_from_cart(context.user_id, PIZZA_ID)
            .await
            .expect("remove pizza");
        let lines = context
            .storage
            .cart_for_user(context.user_id)
            .await
            .expect("list cart");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].course_id, PASTA_ID);

        context
            .storage
            .clear_cart(context.user_id)
            .await
            .expect("clear cart");
        let lines = context
            .storage
            .cart_for_user(context.user_id)
            .await
            .expect("list cart");
        assert!(lines.is_empty(), "clearing should empty the cart");
    });
}

#[rstest]
fn cart_write_maps_missing_schema_to_query_error(storage_context: Option<TestContext>) {
    let Some(context) = storage_context else {
        eprintln!("SKIP-TEST-CLUSTER: cart_write_maps_missing_schema_to_query_error skipped");
        return;
    };

    drop_table(context.database_url.as_str(), "cart_items").expect("drop table succeeds");

    let error = context
        .runtime
        .block_on(context.storage.add_to_cart(context.user_id, PIZZA_ID, 1))
        .expect_err("add should fail when the table is missing");

    assert!(matches!(error, StorageError::Query { .. }));
}
