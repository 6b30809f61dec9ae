use super::Host;
use super::common::{Common, CommonArgs, exit_on_error};
use crate::Result;
use crate::ranking::PackageName;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct PackagesArgs {
    /// Packages to rank
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<PackageName>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_packages<H: Host>(host: &mut H, args: &PackagesArgs) -> Result<()> {
    let result = rank_and_report(host, args).await;
    exit_on_error(host, result)
}

async fn rank_and_report<H: Host>(host: &mut H, args: &PackagesArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;

    // Duplicates would be fetched and ranked twice
    let mut names = Vec::with_capacity(args.packages.len());
    for name in &args.packages {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }

    let ranked = common.rank_packages(&names).await?;
    common.report(&ranked)
}
