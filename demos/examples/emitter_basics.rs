// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emitter basics.
//!
//! Registers three handlers on one channel, removes the middle one by token,
//! and shows that a panicking handler does not stop the others.
//!
//! Run:
//! - `cargo run -p understory_demos --example emitter_basics`

use understory_emitter::Emitter;

fn main() {
    let bus: Emitter<&str> = Emitter::new("demo");

    bus.on("greet", |who: &&str| println!("  first:  hello, {who}"));
    let middle = bus.on("greet", |who: &&str| println!("  second: hi, {who}"));
    bus.on("greet", |who: &&str| println!("  third:  hey, {who}"));

    println!("== All three ==");
    let _ = bus.trigger("greet", &"world");

    println!("== After removing {middle} ==");
    bus.off(&middle);
    let _ = bus.trigger("greet", &"world");

    println!("== With a failing handler in front ==");
    bus.off_channel("greet");
    bus.on("greet", |_: &&str| panic!("this handler is broken"));
    bus.on("greet", |who: &&str| println!("  still delivered to {who}"));
    let delivery = bus.trigger("greet", &"world");
    for failure in &delivery.failures {
        println!("  reported: {failure}");
    }

    bus.clear();
    println!("== After clear: {} handlers ==", bus.handler_count("greet"));
}
