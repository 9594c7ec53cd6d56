//! Command Line Interface for building Streams campaign parameters.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Cell, Row, Table};
use primitive_types::U256;
use std::sync::Arc;
use streams_domain::prelude::*;
use streams_execution::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "streams")]
#[command(about = "Streams liquidity-mining campaign parameter builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the standard fee tiers
    FeeTiers,
    /// Compute the tick range placed around a price
    TickRange {
        /// Price of currency0 in currency1
        #[arg(long)]
        price: f64,

        /// Pool tick spacing
        #[arg(long)]
        tick_spacing: i32,

        /// Spread in ticks; defaults to the configured base spread policy
        #[arg(long)]
        spread: Option<i32>,
    },
    /// Build createCampaign parameters
    BuildCampaign {
        /// First token as ADDRESS:DECIMALS:SYMBOL
        #[arg(long, value_parser = parse_token)]
        token0: TokenDescriptor,

        /// Second token as ADDRESS:DECIMALS:SYMBOL
        #[arg(long, value_parser = parse_token)]
        token1: TokenDescriptor,

        /// Fee in hundredths of a bip (100, 500, 3000 or 10000)
        #[arg(long, default_value_t = 3000)]
        fee: u32,

        /// Price typed by the user, checked for sanity only
        #[arg(long, default_value = "")]
        price: String,

        /// Deposit of the first token, in whole units
        #[arg(long)]
        amount0: String,

        /// Deposit of the second token, in whole units
        #[arg(long)]
        amount1: String,

        /// Reward token as ADDRESS:DECIMALS:SYMBOL
        #[arg(long, value_parser = parse_token)]
        reward: TokenDescriptor,

        /// Reward budget, in whole units
        #[arg(long)]
        reward_amount: String,

        /// Campaign length in days
        #[arg(long, default_value_t = 30)]
        days: u64,

        /// Owner of the minted position
        #[arg(long)]
        recipient: Address,

        /// Unix time used for the deadline; defaults to now
        #[arg(long)]
        now: Option<u64>,

        /// Run the full submission against an in-memory chain and print the batch
        #[arg(long)]
        simulate: bool,
    },
    /// Build addLiquidityToCampaign parameters
    AddLiquidity {
        /// Campaign id
        #[arg(long, value_parser = parse_u256)]
        campaign_id: U256,

        /// Pool currency0 address
        #[arg(long)]
        currency0: Address,

        /// Pool currency1 address
        #[arg(long)]
        currency1: Address,

        /// Pool fee
        #[arg(long, default_value_t = 3000)]
        fee: u32,

        /// Deposit of currency0, in whole units
        #[arg(long)]
        amount0: String,

        /// Deposit of currency1, in whole units
        #[arg(long)]
        amount1: String,

        #[arg(long, default_value_t = 18)]
        decimals0: u8,

        #[arg(long, default_value_t = 18)]
        decimals1: u8,

        /// Unix time used for the deadline; defaults to now
        #[arg(long)]
        now: Option<u64>,
    },
}

fn parse_token(s: &str) -> Result<TokenDescriptor, String> {
    let mut parts = s.splitn(3, ':');
    let (Some(address), Some(decimals), Some(symbol)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected ADDRESS:DECIMALS:SYMBOL, got {s:?}"));
    };
    let address: Address = address.parse().map_err(|e| format!("{e}"))?;
    let decimals: u8 = decimals
        .parse()
        .map_err(|_| format!("invalid decimals {decimals:?}"))?;
    Ok(TokenDescriptor::new(address, decimals, symbol))
}

fn parse_u256(s: &str) -> Result<U256, String> {
    U256::from_dec_str(s).map_err(|e| format!("invalid integer {s:?}: {e:?}"))
}

fn clock_at(now: Option<u64>) -> Arc<dyn Clock> {
    match now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock),
    }
}

fn print_fee_tiers() {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("Fee"),
        Cell::new("Label"),
        Cell::new("Tick spacing"),
        Cell::new("Description"),
    ]));
    for tier in FeeTier::standard() {
        table.add_row(Row::new(vec![
            Cell::new(&tier.fee.to_string()),
            Cell::new(&tier.label),
            Cell::new(&tier.tick_spacing.to_string()),
            Cell::new(&tier.description),
        ]));
    }
    table.printstd();
}

fn print_tick_range(
    config: &BuilderConfig,
    price: f64,
    tick_spacing: i32,
    spread: Option<i32>,
) -> Result<()> {
    if tick_spacing <= 0 {
        anyhow::bail!("tick spacing must be positive, got {tick_spacing}");
    }
    let spread =
        spread.unwrap_or_else(|| spread_for_tick_spacing(config.base_spread, tick_spacing));
    let range = compute_tick_range(price, tick_spacing, spread)?;
    let tick = price_to_tick(price)?;

    println!("Price:        {price}");
    println!("Tick:         {tick}");
    println!("Spread:       {spread}");
    println!(
        "Tick lower:   {} (price {:.8})",
        range.tick_lower,
        tick_to_price(range.tick_lower)
    );
    println!(
        "Tick upper:   {} (price {:.8})",
        range.tick_upper,
        tick_to_price(range.tick_upper)
    );
    println!("Sqrt price:   {}", encode_sqrt_price_x96(price)?);
    Ok(())
}

async fn simulate_campaign(
    input: &CampaignInput,
    builder: CampaignParamsBuilder,
    clock: Arc<dyn Clock>,
) -> Result<()> {
    let gateway = Arc::new(InMemoryGateway::new(input.recipient));
    let config = ExecutionConfig::from_env()?.with_poll_interval(std::time::Duration::ZERO);
    let submitter = CampaignSubmitter::new(gateway.clone(), config)
        .with_builder(builder)
        .with_clock(clock)
        .with_account(input.recipient);

    let outcome = submitter.create_campaign(input).await?;
    let batches = gateway.sent_batches().await;
    let calls = batches.first().cloned().unwrap_or_default();

    println!("{}", serde_json::to_string_pretty(&calls)?);
    if let Some(ContractCall::CreateCampaign(params)) = calls.last() {
        let deadline =
            chrono::DateTime::from_timestamp(params.deadline as i64, 0).unwrap_or_default();
        println!("Deadline:     {}", deadline.format("%Y-%m-%d %H:%M:%S UTC"));
        println!(
            "Per second:   {} {}",
            format_units(
                reward_per_second(params.budget, params.duration),
                input.reward_token.decimals
            ),
            input.reward_token.symbol
        );
    }
    println!("Batch:        {}", outcome.batch_id);
    println!("Status:       {}", submitter.status().await);
    if let Some(campaign_id) = outcome.campaign_id {
        println!("Campaign id:  {campaign_id}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let builder_config = BuilderConfig::from_env().context("invalid builder configuration")?;

    match cli.command {
        Commands::FeeTiers => print_fee_tiers(),
        Commands::TickRange {
            price,
            tick_spacing,
            spread,
        } => print_tick_range(&builder_config, price, tick_spacing, spread)?,
        Commands::BuildCampaign {
            token0,
            token1,
            fee,
            price,
            amount0,
            amount1,
            reward,
            reward_amount,
            days,
            recipient,
            now,
            simulate,
        } => {
            let fee_tier = FeeTier::by_fee(fee)?;
            let input = CampaignInput {
                token0,
                token1,
                fee_tier,
                initial_price_hint: price,
                amount0,
                amount1,
                reward_token: reward,
                reward_amount,
                duration_days: days,
                recipient,
            };
            let clock = clock_at(now);
            let builder = CampaignParamsBuilder::new(builder_config)
                .with_clock(clock.clone())
                .with_observer(Arc::new(TracingObserver));

            if simulate {
                simulate_campaign(&input, builder, clock).await?;
            } else {
                let params = builder.build(&input)?;
                info!(goal = %params.goal, "Built campaign params");
                println!("{}", serde_json::to_string_pretty(&params)?);
            }
        }
        Commands::AddLiquidity {
            campaign_id,
            currency0,
            currency1,
            fee,
            amount0,
            amount1,
            decimals0,
            decimals1,
            now,
        } => {
            let config = AddLiquidityConfig::from_env()
                .context("invalid add-liquidity configuration")?;
            let pool = PoolKey {
                currency0,
                currency1,
                fee,
                tick_spacing: config.tick_spacing_for_fee(fee),
                hooks: builder_config.hooks,
            };
            let params = build_add_liquidity_params(
                &config,
                campaign_id,
                &pool,
                &amount0,
                &amount1,
                decimals0,
                decimals1,
                clock_at(now).now_unix(),
            )?;
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let token = parse_token("0x1111111111111111111111111111111111111111:6:USDC").unwrap();
        assert_eq!(token.decimals, 6);
        assert_eq!(token.symbol, "USDC");

        assert!(parse_token("0x1111111111111111111111111111111111111111:6").is_err());
        assert!(parse_token("0x11:6:USDC").is_err());
        assert!(parse_token("0x1111111111111111111111111111111111111111:x:USDC").is_err());
    }

    #[test]
    fn test_parse_u256() {
        assert_eq!(parse_u256("42").unwrap(), U256::from(42u64));
        assert!(parse_u256("0x2a").is_err());
    }

    #[test]
    fn test_cli_parses_build_campaign() {
        let cli = Cli::try_parse_from([
            "streams",
            "build-campaign",
            "--token0",
            "0x1111111111111111111111111111111111111111:18:A",
            "--token1",
            "0x2222222222222222222222222222222222222222:6:B",
            "--amount0",
            "1000",
            "--amount1",
            "1000",
            "--reward",
            "0x3333333333333333333333333333333333333333:18:R",
            "--reward-amount",
            "500",
            "--recipient",
            "0x4444444444444444444444444444444444444444",
        ])
        .unwrap();
        match cli.command {
            Commands::BuildCampaign { fee, days, simulate, .. } => {
                assert_eq!(fee, 3000);
                assert_eq!(days, 30);
                assert!(!simulate);
            }
            _ => panic!("expected build-campaign"),
        }
    }
}
