// Example: scroll through a large list and watch rows get built lazily.
use rowwindow::{EngineOptions, Paging, RowEngine, RowPosition, RowRange};

fn main() {
    let data: Vec<String> = (0..100_000).map(|i| format!("item {i}")).collect();
    let cells = |e: &String, p: &RowPosition| vec![p.display_index.to_string(), e.clone()];

    let mut engine = RowEngine::new(
        data,
        cells,
        EngineOptions::new(24).with_paging(Paging::new(100_000, 1)),
    );

    engine.batch_update(|e| {
        e.set_min_viewport_rows(20);
        e.set_viewable_range(Some(RowRange::new(0, 20)));
    });
    println!("rendered={:?}", engine.rendered_range());
    println!("rows={} cached={}", engine.rows().len(), engine.cached_row_count());

    for bottom in [5, 10, 40_000] {
        let rebuilt = engine.set_viewable_range(Some(RowRange::new(bottom, bottom + 20)));
        println!(
            "scroll to {bottom}: rebuilt={rebuilt} rendered={:?} cached={}",
            engine.rendered_range(),
            engine.cached_row_count()
        );
    }

    let first = &engine.rows()[0];
    println!(
        "first row: index={} display={} offset_top={} cells={:?}",
        first.row_index(),
        first.display_index(),
        first.offset_top(),
        first.cells()
    );
}
