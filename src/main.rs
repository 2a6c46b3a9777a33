// ==========================================
// 钢板精整线排程引擎 - 命令行入口
// ==========================================
// 用法: plate-line-sched --input plates.csv --output schedule.csv [--json report.json] [--config line.json]
// ==========================================

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use plate_line_sched::config::ConfigManager;
use plate_line_sched::{
    logging, PlateImporter, ScheduleCsvWriter, ScheduleOrchestrator, ScheduleReport, APP_NAME,
    VERSION,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "plate-line-sched", version)]
#[command(about = "钢板精整线排程: 输入钢板清单，输出逐工序时间表", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    /// 钢板清单（.csv / .xlsx / .xls）
    #[arg(short, long, required = true)]
    input: Option<PathBuf>,

    /// 排程表输出路径（CSV）
    #[arg(short, long, required = true)]
    output: Option<PathBuf>,

    /// JSON 报告输出路径
    #[arg(long)]
    json: Option<PathBuf>,

    /// 产线参数文件（JSON）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 日志输出为 JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 只校验钢板清单，不排程
    Validate {
        /// 钢板清单
        input: PathBuf,
    },

    /// 输出当前生效的产线参数
    GenerateConfig {
        /// 输出路径
        #[arg(short, long, default_value = "line_config.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    info!("{} v{}", APP_NAME, VERSION);

    let manager = ConfigManager::discover(cli.config.as_deref()).context("加载产线配置失败")?;

    match cli.command {
        Some(Commands::Validate { input }) => validate_command(&input),
        Some(Commands::GenerateConfig { output }) => {
            manager
                .save_to_file(&output)
                .with_context(|| format!("写入配置失败: {}", output.display()))?;
            println!("已写入 {}", output.display());
            Ok(())
        }
        None => {
            // 无子命令时 clap 已强制两者必填
            let (Some(input), Some(output)) = (cli.input, cli.output) else {
                Cli::command()
                    .error(ErrorKind::MissingRequiredArgument, "排程需要同时指定 --input 与 --output")
                    .exit();
            };
            schedule_command(manager, &input, &output, cli.json.as_deref())
        }
    }
}

fn schedule_command(
    manager: ConfigManager,
    input: &Path,
    output: &Path,
    json: Option<&Path>,
) -> Result<()> {
    let imported = PlateImporter::new()
        .import_file(input)
        .with_context(|| format!("导入钢板清单失败: {}", input.display()))?;

    let orchestrator = ScheduleOrchestrator::new(manager.into_config())?;
    let result = orchestrator.execute(&imported.plates)?;

    ScheduleCsvWriter
        .write_file(output, &result, Some(&imported.table))
        .with_context(|| format!("写入排程表失败: {}", output.display()))?;

    if let Some(json) = json {
        ScheduleReport::new(&result, orchestrator.config())
            .write_file(json)
            .with_context(|| format!("写入排程报告失败: {}", json.display()))?;
    }

    let s = &result.summary;
    println!(
        "钢板 {} 块: 直发 {}, 常化 {}, 无法排程 {}; 炉次 {}; 最晚完工 {}",
        s.total_plates,
        s.direct_count,
        s.normalized_count,
        s.unschedulable_count,
        s.batch_count,
        s.latest_finish
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );
    Ok(())
}

fn validate_command(input: &Path) -> Result<()> {
    let imported = PlateImporter::new()
        .import_file(input)
        .with_context(|| format!("钢板清单校验失败: {}", input.display()))?;
    println!("校验通过: {} 块钢板", imported.plates.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_schedule_requires_input_and_output() {
        let cli = Cli::try_parse_from(["plate-line-sched", "-i", "plates.csv", "-o", "out.csv"]);
        assert!(cli.is_ok());

        let err = Cli::try_parse_from(["plate-line-sched", "--input", "plates.csv"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["plate-line-sched"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_subcommands_skip_schedule_args() {
        let cli = Cli::try_parse_from(["plate-line-sched", "validate", "plates.csv"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Validate { .. })));

        let cli =
            Cli::try_parse_from(["plate-line-sched", "generate-config", "-c", "line.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::GenerateConfig { .. })));
        assert_eq!(cli.config.as_deref(), Some(Path::new("line.json")));
    }
}
