fn main() -> anyhow::Result<()> {
    mxnative::run()
}
