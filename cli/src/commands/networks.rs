use color_eyre::eyre::Result;
use safe_hashes::Network;

use crate::output::NetworkOutput;

pub fn run(json: bool) -> Result<()> {
    let networks: Vec<_> = Network::ALL.iter().map(NetworkOutput::from).collect();
    NetworkOutput::print_all(&networks, json)
}
