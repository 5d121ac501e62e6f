use std::env;
use std::path::PathBuf;

use switchyard::{Error, Flag, Multiple, Result, Single, Tokenizer};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_tracing();
    let code = match Copy::interpret(env::args()) {
        Ok(app) => {
            app.execute();
            0
        }
        Err(e) => report(e),
    };
    std::process::exit(code)
}

fn report(e: Error) -> i32 {
    eprintln!("error: {}", e);
    e.code() as i32
}

#[derive(Debug, PartialEq)]
pub struct Copy {
    src: Vec<PathBuf>,
    dest: PathBuf,
    force: bool,
    verbose: bool,
    shells: Vec<String>,
    mode: Option<u32>,
}

impl Copy {
    fn interpret<T: Iterator<Item = String>>(argv: T) -> Result<Self> {
        let paths = Multiple::<PathBuf>::positional().required();
        let force = Flag::new("force").alias("f");
        let verbose = Flag::new("verbose").alias("v");
        let shells = Multiple::<String>::new("shell").alias("s");
        let mode = Single::<u32>::new("mode");

        let mut args = Tokenizer::new()
            .flags(["force", "f", "verbose", "v"])
            .tokenize(argv);
        args.declare(&paths)
            .declare(&force)
            .declare(&verbose)
            .declare(&shells)
            .declare(&mode);
        args.ready().scope(|a| {
            let mut src = a.get(&paths)?;
            let dest = src.pop().unwrap_or_default();
            Ok(Self {
                src,
                dest,
                force: a.get(&force)?,
                verbose: a.get(&verbose)?,
                shells: a.get(&shells)?,
                mode: a.get(&mode)?,
            })
        })
    }

    fn execute(self) {
        for src in &self.src {
            if self.verbose == true {
                println!("{} -> {}", src.display(), self.dest.display());
            }
        }
        if self.verbose == true {
            println!(
                "force: {}, shells: {:?}, mode: {:?}",
                self.force, self.shells, self.mode
            );
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
