// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use hotseat::{perft, Board, Color, Session};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("quiet-board")
                .help("Do not print the board before each move")
                .long("--quiet-board"),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of the starting position")
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new().show_board(!matches.is_present("quiet-board"));
    if let Err(err) = session.run(stdin.lock(), stdout.lock()) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let board = Board::new();
    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&board, Color::White, i);
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}
