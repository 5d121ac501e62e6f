use std::env;

use switchyard::{Flag, Result, Single, Tokenizer};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_tracing();
    match Greet::interpret(env::args()) {
        Ok(app) => app.execute(),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(e.code() as i32)
        }
    }
}

/// `Greet` says hello to someone, optionally a few times.
#[derive(PartialEq, Debug)]
struct Greet {
    name: String,
    times: u8,
    shout: bool,
}

impl Greet {
    fn interpret<T: Iterator<Item = String>>(argv: T) -> Result<Self> {
        let name = Single::<String>::new("name").alias("n").required();
        let times = Single::<u8>::new("times").alias("t");
        let shout = Flag::new("shout").alias("s");

        let mut args = Tokenizer::new().flags(["shout", "s"]).tokenize(argv);
        args.declare(&name).declare(&times).declare(&shout);
        args.ready().scope(|a| {
            Ok(Greet {
                name: a.get(&name)?,
                times: a.get(&times)?.unwrap_or(1),
                shout: a.get(&shout)?,
            })
        })
    }

    fn message(&self) -> String {
        let msg = format!("hello, {}!", self.name);
        match self.shout {
            true => msg.to_uppercase(),
            false => msg,
        }
    }

    fn execute(self) {
        for _ in 0..self.times {
            println!("{}", self.message());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
