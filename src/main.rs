//! TVM Projection CLI
//!
//! Command-line interface for running savings and retirement projections.
//! Every numeric flag can also be set through a `TVM_*` environment variable.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tvm_projection::{
    io::{write_decumulation, write_trajectory_to_path},
    plan_retirement, simulate_accumulation, simulate_decumulation, CompoundingFrequency,
    ContributionTiming, DecumulationInput, DecumulationResult, ProjectionInput, ProjectionResult,
    RetirementAssumptions, WithdrawalPolicy,
};

#[derive(Parser)]
#[command(name = "tvm", version, about = "Time-value-of-money projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a savings balance forward
    Project {
        #[command(flatten)]
        savings: SavingsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Project savings, then withdrawals, then check the income goal
    Retire {
        #[command(flatten)]
        savings: SavingsArgs,
        #[command(flatten)]
        retirement: RetirementArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Project withdrawals from an existing balance
    Decumulate {
        #[arg(long, env = "TVM_STARTING_BALANCE", default_value_t = 1_000_000.0)]
        starting_balance: f64,
        #[arg(long, env = "TVM_WITHDRAWAL_RATE", default_value_t = 4.0)]
        withdrawal_rate: f64,
        #[arg(long, env = "TVM_RETIREMENT_YEARS", default_value_t = 30)]
        years: u32,
        #[arg(long, env = "TVM_RETIREMENT_RETURN", default_value_t = 5.0)]
        return_rate: f64,
        #[arg(long, env = "TVM_EXTERNAL_ANNUAL_INCOME", default_value_t = 0.0)]
        external_income: f64,
        #[arg(long, value_enum, default_value_t = PolicyArg::Percent)]
        policy: PolicyArg,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct SavingsArgs {
    #[arg(long, env = "TVM_PRINCIPAL", default_value_t = 10_000.0)]
    principal: f64,
    /// Annual growth rate in percent
    #[arg(long, env = "TVM_ANNUAL_RATE", default_value_t = 7.0)]
    rate: f64,
    #[arg(long, env = "TVM_YEARS", default_value_t = 10)]
    years: u32,
    /// Amount added every period
    #[arg(long, env = "TVM_CONTRIBUTION", default_value_t = 500.0)]
    contribution: f64,
    /// Periods per year: 1, 4 or 12
    #[arg(long, env = "TVM_PERIODS_PER_YEAR", default_value_t = 12)]
    periods_per_year: u32,
    #[arg(long, value_enum, default_value_t = TimingArg::End)]
    timing: TimingArg,
    /// Annual inflation in percent
    #[arg(long, env = "TVM_INFLATION", default_value_t = 3.0)]
    inflation: f64,
    /// Report nominal values only
    #[arg(long)]
    no_inflation: bool,
}

#[derive(Args)]
struct RetirementArgs {
    #[arg(long, env = "TVM_RETIREMENT_YEARS", default_value_t = 30)]
    retirement_years: u32,
    #[arg(long, env = "TVM_WITHDRAWAL_RATE", default_value_t = 4.0)]
    withdrawal_rate: f64,
    #[arg(long, env = "TVM_RETIREMENT_RETURN", default_value_t = 5.0)]
    retirement_return: f64,
    /// Desired monthly income in today's money
    #[arg(long, env = "TVM_DESIRED_MONTHLY_INCOME", default_value_t = 4_000.0)]
    desired_income: f64,
    #[arg(long, env = "TVM_EXTERNAL_MONTHLY_INCOME", default_value_t = 0.0)]
    external_income: f64,
    #[arg(long, value_enum, default_value_t = PolicyArg::Percent)]
    policy: PolicyArg,
}

#[derive(Args)]
struct OutputArgs {
    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Write the year-by-year table to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TimingArg {
    Begin,
    End,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Rate applied to the current balance each year
    Percent,
    /// Rate applied to the starting balance, amount held fixed
    Fixed,
}

impl From<PolicyArg> for WithdrawalPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Percent => WithdrawalPolicy::PercentOfBalance,
            PolicyArg::Fixed => WithdrawalPolicy::FixedInitialAmount,
        }
    }
}

impl SavingsArgs {
    fn to_input(&self) -> Result<ProjectionInput> {
        Ok(ProjectionInput {
            principal: self.principal,
            annual_rate: self.rate,
            horizon_years: self.years,
            periodic_contribution: self.contribution,
            periods_per_year: CompoundingFrequency::try_from(self.periods_per_year)?,
            contribution_timing: match self.timing {
                TimingArg::Begin => ContributionTiming::Begin,
                TimingArg::End => ContributionTiming::End,
            },
            inflation_rate: self.inflation,
            apply_inflation: !self.no_inflation,
        })
    }
}

impl RetirementArgs {
    fn to_assumptions(&self) -> RetirementAssumptions {
        RetirementAssumptions {
            retirement_years: self.retirement_years,
            withdrawal_rate_pct: self.withdrawal_rate,
            retirement_return_pct: self.retirement_return,
            withdrawal_policy: self.policy.into(),
            desired_monthly_income: self.desired_income,
            external_monthly_income: self.external_income,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Project { savings, output } => {
            let result = simulate_accumulation(&savings.to_input()?)
                .context("accumulation projection failed")?;
            if let Some(path) = &output.csv {
                write_trajectory_to_path(path, &result.trajectory)
                    .with_context(|| format!("unable to write {}", path.display()))?;
            }
            if output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_accumulation(&result);
            }
        }
        Command::Retire { savings, retirement, output } => {
            let plan = plan_retirement(&savings.to_input()?, &retirement.to_assumptions())
                .context("retirement plan failed")?;
            if let Some(path) = &output.csv {
                write_trajectory_to_path(path, &plan.accumulation.trajectory)
                    .with_context(|| format!("unable to write {}", path.display()))?;
            }
            if output.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_accumulation(&plan.accumulation);
                print_decumulation(&plan.decumulation);

                let gap = &plan.gap;
                println!("\nIncome Goal:");
                println!("  Target (future money): ${:.2}/month", gap.target_monthly_income);
                println!("  Achieved:              ${:.2}/month", gap.achieved_monthly_income);
                if gap.on_track {
                    println!("  On track, surplus ${:.2}/month", -gap.monthly_shortfall_or_surplus);
                } else {
                    println!("  Shortfall ${:.2}/month", gap.monthly_shortfall_or_surplus);
                    println!(
                        "  Extra contribution needed: ${:.2} per period",
                        gap.additional_periodic_contribution_needed
                    );
                }
            }
        }
        Command::Decumulate {
            starting_balance,
            withdrawal_rate,
            years,
            return_rate,
            external_income,
            policy,
            output,
        } => {
            let input = DecumulationInput {
                starting_balance,
                withdrawal_rate_pct: withdrawal_rate,
                horizon_years: years,
                return_rate_pct: return_rate,
                external_annual_income: external_income,
                withdrawal_policy: policy.into(),
            };
            let result = simulate_decumulation(&input).context("withdrawal projection failed")?;
            if let Some(path) = &output.csv {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("unable to create {}", path.display()))?;
                write_decumulation(file, &result.years)?;
            }
            if output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_decumulation(&result);
            }
        }
    }

    Ok(())
}

fn print_accumulation(result: &ProjectionResult) {
    println!("Accumulation ({} years):", result.years());
    println!("{:>4} {:>14} {:>12} {:>12} {:>14} {:>14}",
        "Year", "Start", "Interest", "Contrib", "End", "Real");
    println!("{}", "-".repeat(75));
    for snap in &result.trajectory {
        println!("{:>4} {:>14.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2}",
            snap.year,
            snap.starting_balance,
            snap.interest_earned,
            snap.contributions_made,
            snap.ending_balance,
            snap.real_value,
        );
    }

    let summary = &result.summary;
    println!("\nSummary:");
    println!("  Ending Balance:    ${:.2}", result.ending_balance);
    println!("  Total Contributed: ${:.2}", result.total_contributed);
    println!("  Total Interest:    ${:.2}", result.total_interest);
    println!("  Real Ending Value: ${:.2}", result.real_ending_value);
    println!("  Purchasing Power:  {:.4}", result.purchasing_power_ratio);
    println!("  Nominal Growth:    {:.2}%", summary.nominal_growth_pct);
    println!("  Real Growth:       {:.2}%", summary.real_growth_pct);
    println!("  CAGR:              {:.2}%", summary.compound_annual_growth_rate_pct);
    println!("  Inflation Erosion: ${:.2}", summary.inflation_erosion);
}

fn print_decumulation(result: &DecumulationResult) {
    println!("\nWithdrawals ({} years):", result.years.len());
    println!("{:>4} {:>14} {:>14} {:>16}", "Year", "Withdrawal", "Income", "Remaining");
    println!("{}", "-".repeat(51));
    for year in &result.years {
        println!("{:>4} {:>14.2} {:>14.2} {:>16.2}",
            year.year,
            year.annual_withdrawal,
            year.annual_income,
            year.remaining_balance,
        );
    }
    println!("\n  Total Withdrawn: ${:.2}", result.total_withdrawn);
    println!("  Final Balance:   ${:.2}", result.final_balance);
    if let Some(year) = result.depletion_year {
        println!("  Portfolio depleted in year {}", year);
    }
}
