use std::env;
use vena::flags::Flags;
use vena::shell::Shell;

fn main() {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("vena: {}", e);
        flags.print_help();
        std::process::exit(2);
    }

    if flags.is_set("help") {
        flags.print_help();
        return;
    }

    if flags.is_set("version") {
        println!("Vena {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    vena::logger::init(&flags);

    let code = match Shell::new(flags).and_then(|mut shell| shell.run()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("vena: {}", e);
            1
        }
    };
    std::process::exit(code);
}
