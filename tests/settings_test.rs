// ==========================================
// AnalysisSettings 集成测试
// ==========================================
// 测试目标: 文件加载、默认值、覆写、导出
// ==========================================


use analysis_config::config::SettingsError;
use analysis_config::domain::{ScalarValue, SkyFrame};
use analysis_config::{validate_file, AnalysisSettings, FilterType, LoadError, LogLevel};
use serde_json::json;
use std::path::Path;
use test_helpers::{fixture_path, write_temp_config};

#[test]
fn test_load_fixture() {
    let settings = AnalysisSettings::from_path(&fixture_path("analysis_config.yaml"))
        .expect("示例配置应能加载");

    assert_eq!(settings.out_folder(), Path::new("results"));
    assert_eq!(settings.logging().level, LogLevel::Info);
    assert_eq!(settings.logging().filename.as_deref(), Some("analysis.log"));
    assert_eq!(settings.logging().filemode.as_deref(), Some("w"));

    let filters = settings.filters();
    assert_eq!(filters.len(), 3);
    assert_eq!(filters[0].filter_type(), Some(FilterType::SkyCircle));
    assert_eq!(filters[0].params().frame, Some(SkyFrame::Icrs));
    assert_eq!(
        filters[0].params().radius,
        Some(ScalarValue::Text("1 deg".to_string()))
    );
    assert_eq!(filters[1].params().value_range, Some([60.0, 90.0]));
    assert_eq!(filters[2].params().obs_ids.as_ref().map(Vec::len), Some(4));

    // 开放节原样保留
    let grid = settings.config().grid.as_ref().expect("grid 应存在");
    assert_eq!(grid["energy"]["nbins"], 4);
}

#[test]
fn test_load_json_file() {
    let (_file, path) = write_temp_config(
        r#"{"general": {"logging": {"level": 30}}, "analysis": {}}"#,
        ".json",
    )
    .expect("Failed to write temp config");

    let settings = AnalysisSettings::from_path(&path).expect("JSON 配置应能加载");
    assert_eq!(settings.logging().level, LogLevel::Warning);
    assert_eq!(settings.out_folder(), Path::new("."));
    assert!(settings.config().analysis.is_some());
}

#[test]
fn test_invalid_fixture_reports_all_violations() {
    let err = AnalysisSettings::from_path(&fixture_path("invalid_config.yaml")).unwrap_err();
    let report = err.report().expect("应返回校验报告");
    assert_eq!(report.len(), 8);
    assert!(err.to_string().contains("8"));
}

#[test]
fn test_unparsable_file_is_single_violation() {
    let (_file, path) = write_temp_config("general:\n  logging: [level: INFO\n", ".yaml")
        .expect("Failed to write temp config");

    let err = AnalysisSettings::from_path(&path).unwrap_err();
    let report = err.report().expect("解析失败应转换为校验报告");
    assert_eq!(report.len(), 1);
    assert!(report.violations[0].path.is_root());
}

#[test]
fn test_missing_and_unsupported_files() {
    let err = AnalysisSettings::from_path(Path::new("/nonexistent/config.yaml")).unwrap_err();
    assert!(matches!(err, SettingsError::Load(LoadError::FileNotFound(_))));

    let (_file, path) = write_temp_config("[general]\n", ".toml").expect("Failed to write");
    let err = AnalysisSettings::from_path(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Load(LoadError::UnsupportedFormat(_))));
}

#[test]
fn test_update_from_yaml() {
    let settings = AnalysisSettings::from_path(&fixture_path("analysis_config.yaml")).unwrap();

    let updated = settings
        .update_from_yaml("general:\n  out_folder: other\n  logging:\n    level: DEBUG\n")
        .expect("覆写应通过校验");
    assert_eq!(updated.out_folder(), Path::new("other"));
    assert_eq!(updated.logging().level, LogLevel::Debug);
    // 未覆写的键保留
    assert_eq!(updated.logging().filename.as_deref(), Some("analysis.log"));
    assert_eq!(updated.filters().len(), 3);

    // 原配置不变
    assert_eq!(settings.out_folder(), Path::new("results"));
}

#[test]
fn test_update_rejects_invalid_overlay() {
    let settings = AnalysisSettings::template();
    let err = settings
        .update(&json!({ "observations": { "filter": [{ "filter_type": "ids", "obs_ids": ["a"] }] } }))
        .unwrap_err();
    let report = err.report().expect("应返回校验报告");
    assert_eq!(
        report.violations[0].path.to_string(),
        "observations.filter[0].obs_ids[0]"
    );
    assert_eq!(settings, AnalysisSettings::default());
}

#[test]
fn test_snapshot_json() {
    let settings = AnalysisSettings::template();
    let snapshot: serde_json::Value =
        serde_json::from_str(&settings.snapshot_json().unwrap()).unwrap();
    assert_eq!(
        snapshot,
        json!({ "general": { "out_folder": ".", "logging": { "level": "INFO" } } })
    );
}

#[test]
fn test_validated_file_always_loads() {
    let yaml = "general:\n  logging: {}\nobservations:\n  filter:\n    - obs_ids: [23523.0, 23526]\n    - filter_type: ids\n      obs_ids: [23559]\n";
    let (_file, path) = write_temp_config(yaml, ".yaml").expect("Failed to write temp config");

    let report = validate_file(&path).expect("文件应可读取");
    assert!(report.is_valid(), "{}", report);

    let settings = AnalysisSettings::from_path(&path).expect("通过校验的配置应能加载");
    assert_eq!(settings.logging().level, LogLevel::Info);
    assert_eq!(settings.filters()[0].filter_type(), None);
    assert_eq!(settings.filters()[0].params().obs_ids, Some(vec![23523, 23526]));
    assert_eq!(settings.filters()[1].params().obs_ids, Some(vec![23559]));
}
