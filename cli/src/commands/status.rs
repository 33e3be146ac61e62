use anyhow::bail;
use parkr_common::parking::lot::{LotId, LotStatus};
use parkr_core::engine::AssignmentEngine;

use crate::terminal::{format, print};

pub fn status(engine: &AssignmentEngine, lot: Option<LotId>) -> anyhow::Result<()> {
    let statuses: Vec<LotStatus> = match lot {
        Some(id) => match engine.get_lot_status(id) {
            Some(status) => vec![status],
            None => bail!("lot {id} is not registered"),
        },
        None => engine.lots().iter().map(|l| l.status()).collect(),
    };

    if statuses.is_empty() {
        print::no_results("no lots loaded");
        return Ok(());
    }

    print::header("lot status");
    for status in &statuses {
        print::tree_head(status.lot_id as usize, &status.name);
        print::as_tree_one_level(format::lot_status_details(status));
    }
    Ok(())
}
