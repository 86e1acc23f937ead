use clap::{Parser, Subcommand};
use trolley_app::{config::AppConfig, context::AppContext, errors::AppError};

mod add;
mod checkout;
mod clear;
mod discount;
mod line;
mod remove;
mod show;
mod update;

#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Trolley cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add items to the cart
    Add(add::AddArgs),

    /// Remove a line from the cart
    Remove(remove::RemoveArgs),

    /// Set the quantity of a line; zero or less removes it
    Update(update::UpdateArgs),

    /// Apply a promotion discount ("5.00" or "10%")
    Discount(discount::DiscountArgs),

    /// Empty the cart
    Clear,

    /// Show the cart
    Show(show::ShowArgs),

    /// Hand the cart off as JSON and empty it
    Checkout,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), AppError> {
        let context = AppContext::from_config(&self.config)?;

        match self.command {
            Commands::Add(args) => add::run(&context, &args),
            Commands::Remove(args) => remove::run(&context, &args),
            Commands::Update(args) => update::run(&context, &args),
            Commands::Discount(args) => discount::run(&context, &args),
            Commands::Clear => clear::run(&context),
            Commands::Show(args) => show::run(&context, &args),
            Commands::Checkout => checkout::run(&context),
        }
    }
}
