// End-to-end tests for the narration pipeline
//
// These tests run the whole pipeline through `NarrationService` against mock
// synthesis engines that fabricate deterministic clips, so assertions can be
// made about the joined audio down to the frame. Nothing here talks to a real
// XTTS server; the HTTP adapter is covered separately against a local mock
// server.
//
// Each test gets its own scratch directory and its own service instance, so
// tests run in parallel without conflicts.

mod test_engine;
mod test_pipeline;
