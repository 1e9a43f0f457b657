use stepback_saga::SagaStep;

use super::CheckArgs;
use crate::error::Result;
use crate::plan::Plan;
use crate::shell::ShellStep;

pub(crate) fn run(args: CheckArgs) -> Result<()> {
    let plan = Plan::load(&args.plan)?;

    println!("Plan '{}' is valid: {} step(s)", plan.name, plan.steps.len());
    for (index, step) in plan.steps.iter().cloned().enumerate() {
        let step = ShellStep::from(step);
        println!(
            "  {index}. {} (compensation: {})",
            step.name(),
            step.compensation_description()
        );
    }
    println!("Log: {}", plan.log_path.display());

    Ok(())
}
