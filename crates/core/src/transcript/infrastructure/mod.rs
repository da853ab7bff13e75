pub mod webvtt_reader;
