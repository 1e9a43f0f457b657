use stepback_log::read_events;

use super::LogArgs;
use crate::error::Result;

pub(crate) fn run(args: LogArgs) -> Result<()> {
    let events = read_events(&args.file)?;

    let selected: Vec<_> = events
        .iter()
        .filter(|event| {
            args.execution_id
                .as_deref()
                .is_none_or(|id| event.execution_id.as_str() == id)
        })
        .collect();

    if selected.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    for event in selected {
        println!("{}", event.summary());
    }
    Ok(())
}
