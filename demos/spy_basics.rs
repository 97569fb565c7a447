//! Example: spying on and stubbing container members
//!
//! This example walks through the whole lifecycle of a spy: install,
//! record, inspect, reset, and restore.

use spies::prelude::*;
use spies::values;

fn main() -> Result<()> {
    println!("🕵️ spies - Spy and Stub Examples\n");

    example_observe_a_member()?;
    example_stub_a_member()?;
    example_detached_spy();

    println!("\n✅ All spy examples completed!");
    Ok(())
}

/// Observe a member and inspect its latest invocation
fn example_observe_a_member() -> Result<()> {
    println!("📌 Example 1: Observing a member");

    let mailer = TargetMap::shared();
    mailer.set_member("send", callable(|_| Some(Value::new("sent"))));

    let spy = spy_on(&mailer, "send", Some(Value::new("queued")));

    let result = mailer.invoke("send", &values!["alice@example.com", "hello"])?;

    println!("   invoked: {}", spy.was_invoked());
    println!(
        "   recipient: {:?}",
        spy.captured_argument(1)
            .and_then(|v| v.downcast_ref::<&str>().copied())
    );
    println!(
        "   replacement returned: {:?}",
        result.and_then(|v| v.downcast_ref::<&str>().copied())
    );

    spy.stop_spying();
    let result = mailer.invoke("send", &[])?;
    println!(
        "   after restore: {:?}\n",
        result.and_then(|v| v.downcast_ref::<&str>().copied())
    );
    Ok(())
}

/// Stub a member out entirely, then remove the stub
fn example_stub_a_member() -> Result<()> {
    println!("📌 Example 2: Stubbing a member");

    let billing = TargetMap::shared();
    billing.set_member("charge", callable(|_| Some(Value::new("charged for real!"))));

    let stubbed = stub(&billing, "charge", Some(Value::new("pretend charge")));

    let result = billing.invoke("charge", &values![99.95_f64])?;
    println!(
        "   while stubbed: {:?}",
        result.and_then(|v| v.downcast_ref::<&str>().copied())
    );

    stubbed.remove_stub();
    let result = billing.invoke("charge", &[])?;
    println!(
        "   after remove_stub: {:?}\n",
        result.and_then(|v| v.downcast_ref::<&str>().copied())
    );
    Ok(())
}

/// Spy with no real container at all
fn example_detached_spy() {
    println!("📌 Example 3: Detached spy (no container)");

    let spy = spy_detached("callback", Some(Value::new(42_i32)));

    let f = spy.replacement_fn();
    let result = f(&values!["event payload"]);

    println!("   invoked: {}", spy.was_invoked());
    println!(
        "   returned: {:?}",
        result.and_then(|v| v.downcast_ref::<i32>().copied())
    );
    println!("   captured args: {}", spy.captured_arguments().len());
}
