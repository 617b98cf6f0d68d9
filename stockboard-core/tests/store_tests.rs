use std::fs;
use stockboard_core::store::STORAGE_KEY;
use stockboard_core::{
    Dashboard, DashboardDataset, DashboardStore, FieldEdit, FileStorage, Section, Storage,
    StockboardConfig,
};

#[test]
fn test_file_storage_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut store = DashboardStore::new(FileStorage::new(dir.path().join("state")));
    assert!(store.load().is_none());

    let mut dataset = DashboardDataset::default();
    dataset.sales_trend.rotate_left(3);
    dataset.inventory_status[0].color = "#000000".to_string();
    store.save(&dataset)?;

    let slot = dir.path().join("state").join(format!("{}.json", STORAGE_KEY));
    assert!(slot.exists());
    assert!(!slot.with_extension("json.tmp").exists());

    let reopened = DashboardStore::new(FileStorage::new(dir.path().join("state")));
    assert_eq!(reopened.load(), Some(dataset));
    Ok(())
}

#[test]
fn test_persisted_layout_uses_dashboard_keys() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut storage = FileStorage::new(dir.path());
    DashboardStore::new(storage.clone()).save(&DashboardDataset::default())?;

    let raw = storage.get_item(STORAGE_KEY)?.expect("slot written");
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    for key in [
        "stats",
        "gpAnalysis",
        "inventoryStatus",
        "topProducts",
        "categoryPerformance",
        "salesTrend",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["topProducts"][1]["sku"], "STL-992");

    storage.set_item(STORAGE_KEY, "not json")?;
    assert!(DashboardStore::new(storage).load().is_none());
    Ok(())
}

#[test]
fn test_corrupted_state_falls_back_to_sample() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join(format!("{}.json", STORAGE_KEY)), "{\"stats\": 42}")?;

    let dashboard = Dashboard::open(DashboardStore::new(FileStorage::new(dir.path())));
    assert_eq!(dashboard.data(), &DashboardDataset::default());
    Ok(())
}

#[test]
fn test_session_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config: StockboardConfig = toml::from_str(&format!(
        "[storage]\ndir = {:?}\nkey = \"osi\"\n",
        dir.path().display().to_string()
    ))?;

    let mut dashboard = Dashboard::open(DashboardStore::with_key(
        config.file_storage(),
        &config.storage.key,
    ));
    dashboard.edit(&FieldEdit::new(Section::Products, 0, "revenue", "Rp 125M"))?;
    dashboard.import_csv(Section::Gp, "label,value\nGP %,30%\n")?;

    let reopened = Dashboard::open(DashboardStore::with_key(
        config.file_storage(),
        &config.storage.key,
    ));
    assert_eq!(reopened.data().top_products[0].revenue, "Rp 125M");
    assert_eq!(reopened.data().gp_analysis.len(), 1);
    assert_eq!(reopened.data().gp_analysis[0].value, "30%");
    assert!(dir.path().join("osi.json").exists());
    Ok(())
}
