// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let added = session.add_category(name)?;
            println!("Added category '{}'", added);
        }
        Some(("rename", sub)) => {
            let from = sub.get_one::<String>("from").unwrap().trim();
            let to = sub.get_one::<String>("to").unwrap();
            let before = session
                .transactions()
                .iter()
                .filter(|t| t.category == from)
                .count();
            let renamed = session.rename_category(from, to)?;
            println!(
                "Renamed category '{}' to '{}' ({} transactions moved)",
                from, renamed, before
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let moved = session.delete_category(name)?;
            println!(
                "Removed category '{}' ({} transactions moved to 'Other')",
                name, moved
            );
        }
        Some(("list", _)) => {
            let data = session
                .categories()
                .iter()
                .map(|name| {
                    let n = session
                        .transactions()
                        .iter()
                        .filter(|t| &t.category == name)
                        .count();
                    vec![name.clone(), n.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Transactions"], data));
        }
        _ => {}
    }
    Ok(())
}
