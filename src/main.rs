use clap::{Parser, Subcommand};
use std::path::PathBuf;
use teedoc::{build, check, config};

#[derive(Parser)]
#[command(name = "teedoc", about = "文档站点生成器", version = long_version())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 构建静态站点
    Build {
        /// 文档根目录（包含 site_config.json，默认当前目录）
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// 构建前清除输出目录
        #[arg(long)]
        clean: bool,
    },

    /// 检查站点配置与目录结构
    Check {
        /// 文档根目录（默认当前目录）
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 使用站点配置中的日志级别作为默认值，RUST_LOG 优先
    let default_level = match &cli.command {
        Commands::Build { path, .. } | Commands::Check { path } => {
            config::SiteConfig::load(path).ok().map(|c| c.build.log_level)
        }
    };
    let default_level = default_level.as_deref().unwrap_or("info");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Build { path, clean } => {
            let root = path.canonicalize()?;
            let site_config = config::SiteConfig::load(&root)?;
            let report = build::run(&root, &site_config, build::BuildParams { clean })?;

            // 各路由的错误已在构建过程中记录
            if !report.is_success() {
                anyhow::bail!(
                    "构建未完成：{} 条路由失败，{} 个资源错误",
                    report.failed_routes().count(),
                    report.asset_errors.len()
                );
            }
        }
        Commands::Check { path } => {
            let root = path.canonicalize()?;
            let result = check::run(&root)?;

            for w in &result.warnings {
                tracing::warn!("{w}");
            }
            for e in &result.errors {
                tracing::error!("{e}");
            }

            if result.errors.is_empty() {
                tracing::info!("检查通过（{} 个警告）", result.warnings.len());
            } else {
                anyhow::bail!(
                    "检查未通过：{} 个错误，{} 个警告",
                    result.errors.len(),
                    result.warnings.len()
                );
            }
        }
    }

    Ok(())
}

const fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\ncommit:  ",
        env!("TEEDOC_GIT_COMMIT"),
        "\ntarget:  ",
        env!("TEEDOC_BUILD_TARGET"),
        "\nprofile: ",
        env!("TEEDOC_BUILD_PROFILE"),
    )
}
