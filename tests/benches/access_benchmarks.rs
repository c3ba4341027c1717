//! # Life Portal Access Benchmarks
//!
//! Every page request runs the route ACL and at least one policy decision,
//! so both sit on the hot path.
//!
//! | Check | Runs | Target |
//! |-------|------|--------|
//! | lc-02 route ACL | every request | < 10µs |
//! | lc-01 report window | report pages | < 1µs |
//! | lc-01 policy table | every guarded page | < 1µs |
//! | lc-04 CSP header | every response | < 10µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use lc_01_access_policy::{authorize, can_edit_report_at, AccessRequest, Action, Resource};
use lc_02_route_acl::{ClaimsDecoder, RouteAcl};
use lc_04_web_gateway::middleware::{content_security_policy, generate_nonce};
use lc_tests::fixtures::{ended_event, now, session_cookie};
use shared_types::{EventReport, Role, Viewer};

// ============================================================================
// LC-02: Route ACL
// ============================================================================

fn bench_route_acl(c: &mut Criterion) {
    let mut group = c.benchmark_group("lc-02-route-acl");
    group.measurement_time(Duration::from_secs(5));

    let Ok(acl) = RouteAcl::new(ClaimsDecoder::verifying(b"bench-secret")) else {
        return;
    };
    let cookie = session_cookie("drama.club", Role::Club, "bench-secret");

    let paths = [
        ("excluded", "/_next/static/chunk.js"),
        ("public", "/calendar"),
        ("literal", "/manage/events/new"),
        ("param", "/manage/events/64f0c1/report/new"),
        ("club_redirect", "/manage/clubs"),
    ];

    for (name, path) in paths {
        group.bench_with_input(BenchmarkId::new("decide", name), &path, |b, path| {
            b.iter(|| black_box(acl.decide(path, Some(&cookie))))
        });
    }

    group.bench_function("decide_anonymous", |b| {
        b.iter(|| black_box(acl.decide("/manage/events/64f0c1", None)))
    });

    group.finish();
}

// ============================================================================
// LC-01: Report Window and Policy Table
// ============================================================================

fn bench_access_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("lc-01-access-policy");

    let event = ended_event("ev1", "drama.club", 1);
    let report = EventReport::submitted("ev1", "2024-06-14T09:30:00.000Z");
    let viewers = [
        ("club", Viewer::new("drama.club", Role::Club)),
        ("cc", Viewer::new("cc", Role::Cc)),
        ("slo", Viewer::new("slo", Role::Slo)),
        ("public", Viewer::new("a.b", Role::Public)),
    ];

    for (name, viewer) in &viewers {
        group.bench_with_input(
            BenchmarkId::new("can_edit_report", name),
            viewer,
            |b, viewer| b.iter(|| black_box(can_edit_report_at(&event, Some(&report), viewer, now()))),
        );
    }

    group.throughput(Throughput::Elements(viewers.len() as u64));
    group.bench_function("authorize_report_edit", |b| {
        b.iter(|| {
            for (_, viewer) in &viewers {
                let request = AccessRequest::new(
                    viewer,
                    Resource::EventReport {
                        event: Some(&event),
                        report: Some(&report),
                    },
                    now(),
                );
                black_box(authorize(Action::Edit, &request));
            }
        })
    });

    group.finish();
}

// ============================================================================
// LC-04: Security Headers
// ============================================================================

fn bench_security_headers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lc-04-security-headers");

    group.bench_function("nonce_and_policy", |b| {
        b.iter(|| {
            let nonce = generate_nonce();
            black_box(content_security_policy(&nonce, "/manage/events/ev1", true))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_route_acl,
    bench_access_policy,
    bench_security_headers,
);

criterion_main!(benches);
