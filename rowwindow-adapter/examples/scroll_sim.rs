// Example: simulate a scrolling viewport and a re-sort that keeps the top row anchored.
use std::collections::HashMap;

use rowwindow::{EngineOptions, RowEngine, RowPosition};
use rowwindow_adapter::ScrollController;

fn main() {
    let data: Vec<u32> = (0..10_000).collect();
    let cells = |e: &u32, p: &RowPosition| format!("{:>6} | value {e}", p.display_index);
    let engine = RowEngine::new(data, cells, EngineOptions::new_with_key(18, |e: &u32| *e));
    let mut c = ScrollController::new(engine);

    c.on_frame(360, 0);
    for offset in (0..2_000).step_by(250) {
        let rebuilt = c.on_scroll(offset);
        println!(
            "offset={offset:>5} rebuilt={rebuilt:<5} rendered={:?}",
            c.engine().rendered_range()
        );
    }

    let resorted: Vec<u32> = (0..10_000).rev().collect();
    let index: HashMap<u32, usize> = resorted.iter().enumerate().map(|(i, e)| (*e, i)).collect();
    let anchored = c.replace_data_source_anchored(resorted, |k| index.get(k).copied());
    println!(
        "after resort: anchored={anchored} offset={} first_row={}",
        c.scroll_offset(),
        c.engine().rows()[0].cells()
    );
}
