//! Address command - split a one-line address into components.

use clap::Args;

use fdx_core::address::{expand_street_type, parse_address_description};

/// Arguments for the address command.
#[derive(Args)]
pub struct AddressArgs {
    /// Address description, e.g. "12 Smith St, Paddington 4064, QLD"
    #[arg(required = true)]
    description: String,

    /// Expand abbreviated street types (St -> Street)
    #[arg(long)]
    expand: bool,
}

pub async fn run(args: AddressArgs) -> anyhow::Result<()> {
    let mut components = parse_address_description(&args.description);

    if args.expand && !components.street_type.is_empty() {
        components.street_type = expand_street_type(&components.street_type);
    }

    println!("{}", serde_json::to_string_pretty(&components)?);

    Ok(())
}
