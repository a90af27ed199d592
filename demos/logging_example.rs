use ctxlog::logging::{self, LevelFilter};
use ctxlog::propagation::{self, current};
use ctxlog::{Carrier, attach_logger, errorf, infof, kv, logger_from, warnf};

fn handle(carrier: &Carrier, user: &str) {
    let log = logger_from(carrier).with_context("handler");
    infof!(log => "serving {}", user);
    log.as_key_value().infof(kv!("user" => user, "status" => 200));
}

#[tokio::main]
async fn main() {
    // Route the log crate through the default logger
    logging::init(LevelFilter::Info).unwrap();

    infof!("starting up");
    warnf!("cache is cold");

    let api = ctxlog::context("api");
    let carrier = attach_logger(&Carrier::new(), api.clone());
    handle(&carrier, "ada lovelace");

    propagation::scope(api.with_context("jobs"), async {
        errorf!(current() => "job {} failed", 3);
        log::info!(target: "scheduler", "rescheduling");
    })
    .await;
}
