/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description: SMA 크로스오버 백테스트 CLI
**/

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use sma_crossover::backtest::{run_sweep, BacktestScenarioBuilder, CsvDataProvider, HistoricalDataProvider};
use sma_crossover::config::Config;
use sma_crossover::models::Trade;
use sma_crossover::utils::logging;
use sma_crossover::utils::math::round_display;

#[derive(Parser, Debug)]
#[command(author, version, about = "SMA crossover backtester over daily price series")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Config file (toml/json/yaml); defaults to ./config.* if present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Instrument symbol
    #[arg(short, long, global = true)]
    symbol: Option<String>,

    /// Start date (inclusive), YYYY-MM-DD
    #[arg(long, global = true)]
    start: Option<NaiveDate>,

    /// End date (exclusive), YYYY-MM-DD
    #[arg(long, global = true)]
    end: Option<NaiveDate>,

    /// Initial cash budget
    #[arg(short, long, global = true)]
    budget: Option<Decimal>,

    /// Price CSV file (date + close/adj close columns)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of the text report
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single backtest
    Run(RunArgs),
    /// Run every (short, long) window pair in parallel
    Sweep(SweepArgs),
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Short SMA window
    #[arg(long)]
    short: Option<usize>,

    /// Long SMA window
    #[arg(long)]
    long: Option<usize>,

    /// Write the trade log to this CSV file
    #[arg(long)]
    trades_csv: Option<PathBuf>,

    /// Write the daily equity curve to this CSV file
    #[arg(long)]
    equity_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Short windows, comma separated
    #[arg(long, value_delimiter = ',', default_value = "10,20,50")]
    shorts: Vec<usize>,

    /// Long windows, comma separated
    #[arg(long, value_delimiter = ',', default_value = "100,150,200")]
    longs: Vec<usize>,

    /// Number of best results to print
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let mut config = match &cli.common.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("설정 로드 실패")?;
    apply_overrides(&mut config, &cli.common);

    // 로깅 초기화
    logging::init(&config.logging.level);
    log::info!("설정 로드 완료: {}", config.strategy.symbol);

    match cli.command {
        Some(Command::Sweep(args)) => run_sweep_command(&config, &args, cli.common.json),
        Some(Command::Run(args)) => run_backtest(config, &args, cli.common.json),
        None => run_backtest(config, &RunArgs::default(), cli.common.json),
    }
}

fn apply_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(symbol) = &args.symbol {
        config.strategy.symbol = symbol.clone();
    }
    if let Some(start) = args.start {
        config.strategy.start_date = start;
    }
    if let Some(end) = args.end {
        config.strategy.end_date = end;
    }
    if let Some(budget) = args.budget {
        config.strategy.initial_budget = budget;
    }
    if let Some(data) = &args.data {
        config.data.file_path = Some(data.to_string_lossy().to_string());
    }
}

fn run_backtest(mut config: Config, args: &RunArgs, json: bool) -> Result<(), anyhow::Error> {
    if let Some(short) = args.short {
        config.strategy.short_window = short;
    }
    if let Some(long) = args.long {
        config.strategy.long_window = long;
    }
    config.validate()?;

    let scenario = BacktestScenarioBuilder::from_config(&config.strategy)
        .data_file(PathBuf::from(config.price_file()))
        .build()?;

    let report = scenario.run()?;

    if let Some(path) = &args.trades_csv {
        write_trades_csv(path, &report.result.trades)?;
        log::info!("거래 내역 저장: {}", path.display());
    }
    if let Some(path) = &args.equity_csv {
        write_csv(path, &report.result.equity_curve)?;
        log::info!("자산 곡선 저장: {}", path.display());
    }

    if json {
        let rounded = serde_json::json!({
            "summary": report.summary.for_display(),
            "trades": report.result.trades.iter().map(Trade::for_display).collect::<Vec<_>>(),
            "equity_curve": report.result.equity_curve,
        });
        println!("{}", serde_json::to_string_pretty(&rounded)?);
        return Ok(());
    }

    println!("\n{}", report.summary);

    println!("\nTrades:");
    for trade in &report.result.trades {
        println!("{}", trade);
    }

    if let Some(trade) = report.result.max_profit_trade() {
        println!("\n최대 수익 거래: {}", trade);
    }
    if let Some(trade) = report.result.max_loss_trade() {
        println!("최대 손실 거래: {}", trade);
    }

    println!("\nEquity curve (last 5):");
    let curve = &report.result.equity_curve;
    for point in &curve[curve.len().saturating_sub(5)..] {
        println!(
            "{} equity={:.2} cash={:.2} shares={}",
            point.date,
            round_display(point.equity),
            round_display(point.cash),
            point.shares_held
        );
    }

    Ok(())
}

fn run_sweep_command(config: &Config, args: &SweepArgs, json: bool) -> Result<(), anyhow::Error> {
    config.validate()?;

    let strategy = &config.strategy;
    let provider = CsvDataProvider::new(config.price_file(), ',')?;
    let series = provider.load_series(&strategy.symbol, strategy.start_date, strategy.end_date)?;

    let results = run_sweep(&series, strategy.initial_budget, &args.shorts, &args.longs)?;
    let best: Vec<_> = results.into_iter().take(args.top).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&best)?);
        return Ok(());
    }

    println!("\n===== SMA WINDOW SWEEP: {} =====", strategy.symbol);
    println!("{:>6} {:>6} {:>12} {:>9} {:>7} {:>9}", "short", "long", "final_cash", "roi_%", "trades", "win_%");
    for r in &best {
        println!(
            "{:>6} {:>6} {:>12.2} {:>9.2} {:>7} {:>9.2}",
            r.short_window,
            r.long_window,
            round_display(r.final_cash),
            round_display(r.roi_percent),
            r.trades,
            round_display(r.win_rate_percent)
        );
    }

    Ok(())
}

/// CSV 출력용 거래 행 (매수 행의 진입 정보 열은 빈 칸)
#[derive(Serialize)]
struct TradeRow {
    kind: String,
    date: NaiveDate,
    price: Decimal,
    shares: u64,
    cash_after: Decimal,
    entry_date: Option<NaiveDate>,
    entry_price: Option<Decimal>,
    realized_profit: Option<Decimal>,
}

impl From<&Trade> for TradeRow {
    fn from(trade: &Trade) -> Self {
        let t = trade.for_display();
        TradeRow {
            kind: t.kind.to_string(),
            date: t.date,
            price: t.price,
            shares: t.shares,
            cash_after: t.cash_after,
            entry_date: t.entry_date,
            entry_price: t.entry_price,
            realized_profit: t.realized_profit,
        }
    }
}

fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<(), anyhow::Error> {
    let rows: Vec<TradeRow> = trades.iter().map(TradeRow::from).collect();
    write_csv(path, &rows)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), anyhow::Error> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("{} 파일 생성 실패", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
