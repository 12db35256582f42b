use chrono::Local;
use nutriscan_engine::client::{OpenFoodFactsClient, ProductLookup};
use nutriscan_engine::{Nutrient, SessionContext};

mod common;

// Nutella 400 g jar
const KNOWN_BARCODE: &str = "3017620422003";

fn live_client() -> Option<OpenFoodFactsClient> {
    dotenvy::dotenv().ok();
    if std::env::var("NUTRISCAN_LIVE_TESTS").ok().as_deref() != Some("1") {
        return None;
    }
    common::init_logging();
    OpenFoodFactsClient::from_env().ok()
}

#[tokio::test]
async fn lookup_known_product() {
    let Some(client) = live_client() else {
        eprintln!("skipping lookup_known_product: NUTRISCAN_LIVE_TESTS not set");
        return;
    };

    let product = client.lookup(KNOWN_BARCODE).await.unwrap();
    let product = product.expect("known barcode should resolve");

    assert!(product.product_name.is_some());
    let nutriments = product.nutriments.expect("should carry nutrient facts");
    assert!(nutriments.energy_kcal.unwrap_or_default() > 0.0);
    assert!(nutriments.sugars.unwrap_or_default() > 0.0);
}

#[tokio::test]
async fn lookup_unknown_product() {
    let Some(client) = live_client() else {
        eprintln!("skipping lookup_unknown_product: NUTRISCAN_LIVE_TESTS not set");
        return;
    };

    let product = client.get_product("0000000000000").await.unwrap();
    assert!(product.is_none());
}

#[tokio::test]
async fn scanned_product_folds_into_session() {
    let Some(client) = live_client() else {
        eprintln!("skipping scanned_product_folds_into_session: NUTRISCAN_LIVE_TESTS not set");
        return;
    };

    let today = Local::now().date_naive();
    let mut session = SessionContext::complete_onboarding(common::baseline_male(), today).unwrap();

    let record = client
        .lookup_record(KNOWN_BARCODE, 1.0)
        .await
        .unwrap()
        .expect("known barcode should scale");
    let calories = record.get(Nutrient::Calories).unwrap();
    assert!(calories > 0.0);

    let log = session.record(&record);
    assert_eq!(log.macros.calories, calories);

    let progress = session.progress().unwrap();
    let sugar = progress.iter().find(|p| p.nutrient == Nutrient::Sugar).unwrap();
    assert!(sugar.percent > 0.0);
}

#[tokio::test]
async fn rejects_malformed_barcode() {
    let client = OpenFoodFactsClient::new().unwrap();
    assert!(client.get_product("not-a-barcode").await.is_err());
    assert!(client.get_product("   ").await.is_err());
}
