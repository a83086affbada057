// Example: replacing the data source (e.g. after sorting) invalidates every cached row.
use std::sync::Arc;

use rowwindow::{EngineOptions, NoCells, RowEngine, RowRange};

#[derive(Debug)]
struct Record {
    id: u64,
    name: String,
}

fn main() {
    let records: Vec<Arc<Record>> = (0..500)
        .map(|id| {
            Arc::new(Record {
                id,
                name: format!("record {id}"),
            })
        })
        .collect();

    let mut engine = RowEngine::new(
        records.clone(),
        NoCells,
        EngineOptions::new_with_key(20, |r: &Arc<Record>| r.id),
    );
    engine.set_on_change(Some(|e: &RowEngine<Vec<Arc<Record>>, NoCells>| {
        println!("rebuilt rows for {:?}", e.rendered_range());
    }));
    engine.batch_update(|e| {
        e.set_min_viewport_rows(10);
        e.set_viewable_range(Some(RowRange::new(100, 110)));
    });
    println!("record 105 is at row {:?}", engine.row_index_for_key(&105));

    let mut sorted = records;
    sorted.sort_by(|a, b| b.name.cmp(&a.name));
    engine.replace_data_source(sorted);
    println!("record 105 is now at row {:?}", engine.row_index_for_key(&105));
    println!("first rendered: {:?}", engine.rows()[0].entity());
}
