//! `va-admin orders` / `va-admin leads`.

use va_console::{table, Record, RecordBoard, RefreshMode, Route};

use crate::context::Console;

pub async fn list<R: Record>(console: &Console, route: Route) -> anyhow::Result<()> {
    console.enter(route)?;
    let board = RecordBoard::<R>::new(console.api(), console.notifier());
    board.refresh(RefreshMode::Loud).await?;

    let rows: Vec<Vec<String>> = board.rows().iter().map(R::cells).collect();
    print!(
        "{}",
        table::render(R::headers(), &rows, &format!("No {} yet.", R::NOUN))
    );
    Ok(())
}
