// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use edb_source::Client;
use edb_testkit::{sample_details, sample_summary, to_csv};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server};

fn csv_response(body: String) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body).with_status_code(200).with_header(
        Header::from_bytes("Content-Type", "text/csv; charset=utf-8")
            .expect("valid content type header"),
    )
}

#[test]
fn unreachable_server_reports_url() {
    let client = Client::with_urls(
        "http://127.0.0.1:1/resume.csv",
        "http://127.0.0.1:1/details.csv",
        Duration::from_millis(200),
    )
    .expect("client should initialize");

    let error = client
        .fetch_all()
        .expect_err("fetch should fail for unreachable endpoint");
    let message = format!("{error:#}");
    assert!(message.contains("fetch summary table"), "got {message}");
    assert!(message.contains("127.0.0.1:1"), "got {message}");
}

#[test]
fn fetch_all_reads_summary_then_details() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("summary request expected");
        assert_eq!(request.url(), "/data/resume.csv");
        request
            .respond(csv_response(to_csv(&sample_summary())))
            .expect("response should succeed");

        let request = server.recv().expect("details request expected");
        assert_eq!(request.url(), "/data/details.csv");
        request
            .respond(csv_response(to_csv(&sample_details())))
            .expect("response should succeed");
    });

    let client = Client::with_urls(
        &format!("{base}/data/resume.csv"),
        &format!("{base}/data/details.csv"),
        Duration::from_secs(2),
    )?;
    let tables = client.fetch_all()?;
    assert_eq!(tables.summary, sample_summary());
    assert_eq!(tables.details, sample_details());

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn http_error_on_details_fails_whole_fetch() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("summary request expected");
        request
            .respond(csv_response(to_csv(&sample_summary())))
            .expect("response should succeed");

        let request = server.recv().expect("details request expected");
        request
            .respond(Response::from_string("404: Not Found").with_status_code(404))
            .expect("response should succeed");
    });

    let client = Client::with_urls(
        &format!("{base}/resume.csv"),
        &format!("{base}/details.csv"),
        Duration::from_secs(2),
    )?;
    let error = client
        .fetch_all()
        .expect_err("missing details should fail the fetch");
    let message = format!("{error:#}");
    assert!(message.contains("fetch details table"), "got {message}");
    assert!(message.contains("404"), "got {message}");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn ragged_rows_are_delivered_unpadded() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(csv_response("site,ec_npp_100ml,ent_npp_100ml\nMagenta,12\n".to_owned()))
            .expect("response should succeed");
    });

    let client = Client::with_urls(
        &format!("{base}/resume.csv"),
        &format!("{base}/details.csv"),
        Duration::from_secs(2),
    )?;
    let table = client.fetch_table(client.summary_url())?;
    assert_eq!(table.header().len(), 3);
    assert_eq!(table.row(1).map(<[String]>::len), Some(2));

    handle.join().expect("server thread should join");
    Ok(())
}
