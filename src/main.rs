use std::io::Write;

use apigate::Gate;
use apigate::config::Config;
use apigate::input::read_payload;

fn main() {
    let config = Config::load();
    apigate::logging::init(&config.settings);

    let gate = Gate::from_config(&config);
    let request = gate.read(read_payload(std::io::stdin().lock()));
    let decision = gate.decide(&request);
    apigate::logging::log_decision(request.command.text(), &decision);

    // No line means no opinion; the exit status is 0 either way
    if let Some(line) = gate.render(&decision) {
        let _ = writeln!(std::io::stdout(), "{line}");
    }
}
