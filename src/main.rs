// ==========================================
// 供应链碳排放核算 - 命令行入口
// ==========================================
// 用法:
//   carbon-analytics <shipments.csv> [config.json]
//
// 输出: BatchOutcome (JSON) 写入 stdout, 日志写入 stderr
// 环境变量:
//   RUST_LOG                     日志级别
//   CARBON_LOG_FORMAT=json       JSON 日志
//   CARBON_ANOMALY_Z_THRESHOLD   异常阈值覆写
//   CARBON_INCLUDE_SCOPE_3       是否计入范围三
// ==========================================

use anyhow::Context;
use carbon_analytics::config::CarbonConfig;
use carbon_analytics::engine::CarbonOrchestrator;
use carbon_analytics::importer::load_shipments_from_csv;
use carbon_analytics::logging;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    match std::env::var("CARBON_LOG_FORMAT") {
        Ok(v) if v.trim().eq_ignore_ascii_case("json") => logging::init_json(),
        _ => logging::init(),
    }

    let mut args = std::env::args().skip(1);
    let shipments_path = args
        .next()
        .context("用法: carbon-analytics <shipments.csv> [config.json]")?;
    let config_path = args.next();

    tracing::info!("{} v{}", carbon_analytics::APP_NAME, carbon_analytics::VERSION);

    // 加载配置
    let config = match config_path {
        Some(path) => CarbonConfig::from_json_file(&path)
            .with_context(|| format!("无法加载配置文件: {}", path))?,
        None => CarbonConfig::default(),
    }
    .with_env_overrides()
    .context("环境变量覆写失败")?;

    // 导入运单
    let mut records = load_shipments_from_csv(&shipments_path)
        .with_context(|| format!("无法导入运单文件: {}", shipments_path))?;

    // 批处理
    let orchestrator = CarbonOrchestrator::new(Arc::new(config));
    let outcome = orchestrator.run_batch(&mut records, None);

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
