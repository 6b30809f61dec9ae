use super::Host;
use super::common::{Common, CommonArgs, exit_on_error};
use crate::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct UserArgs {
    /// npm user whose packages are ranked
    #[arg(value_name = "USER")]
    pub user: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_user<H: Host>(host: &mut H, args: &UserArgs) -> Result<()> {
    let result = rank_and_report(host, args).await;
    exit_on_error(host, result)
}

async fn rank_and_report<H: Host>(host: &mut H, args: &UserArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let ranked = common.rank_user(&args.user).await?;

    common.report(&ranked)
}
