use handlebars_etl::dialects::sendgrid;

fn main() {
    divan::main();
}

const SAMPLE: &str = include_str!("../../../demos/sample.hbs");

#[divan::bench]
fn bench_compile_sample(bencher: divan::Bencher) {
    let registry = sendgrid::registry();

    bencher.bench(|| handlebars_etl::compile_with(SAMPLE, &registry).expect("sample must compile"));
}

#[divan::bench]
fn bench_compile_identity_passthrough(bencher: divan::Bencher) {
    let plain = "plain text with no tags at all, repeated a fair number of times. ".repeat(64);

    bencher.bench(|| handlebars_etl::compile(&plain).expect("plain text must compile"));
}
