//! # hhreplay-engine: Hand History Replay Core
//!
//! Turns PokerStars hand-history exports (English client, tournament or
//! cash) into structured, replayable hands. Parsing is a pure text-to-data
//! transform: no I/O, no clock, no shared mutable state, so the same text
//! always yields the same replay and hands can be parsed from any thread.
//!
//! ## Core Modules
//!
//! - [`segment`] - Splitting an export into single-hand blocks
//! - [`grammar`] - The shared line grammar and live-play action rules
//! - [`header`] - Hand header and table line
//! - [`seats`] - Seated players, button/blind walk and position labels
//! - [`hero`] - The `Dealt to` player
//! - [`street`] - Street state machine and per-street action building
//! - [`summary`] - The `*** SUMMARY ***` side-channel
//! - [`replay`] - [`HandParser`] and the playback event sequence
//! - [`gaps`] - Hero review hints
//! - [`batch`] - Whole-export parsing with per-hand containment
//! - [`language`] - English-only pre-pass
//! - [`view`] - Flat output records
//! - [`model`] - Data model
//! - [`errors`] - Reject and batch errors
//!
//! ## Quick Start
//!
//! ```rust
//! use hhreplay_engine::replay::HandParser;
//! use hhreplay_engine::model::StreetName;
//!
//! let text = "\
//! PokerStars Hand #1: Tournament #2, Hold'em No Limit - Level I (10/20) - 2025/07/30 20:13:26 ET
//! Table '2 1' 9-max Seat #1 is the button
//! Seat 1: alice (1500 in chips)
//! Seat 2: bob (1500 in chips)
//! alice: posts small blind 10
//! bob: posts big blind 20
//! *** HOLE CARDS ***
//! Dealt to bob [Ah Kd]
//! alice: calls 10
//! bob: checks
//! *** FLOP *** [7s 3d 2d]
//! bob: bets 20
//! alice: folds
//! Uncalled bet (20) returned to bob
//! bob collected 40 from pot";
//!
//! let replay = HandParser::new().parse(text).unwrap();
//! assert_eq!(replay.hand_id, "1");
//! assert_eq!(replay.street(StreetName::Flop).unwrap().cards, ["7s", "3d", "2d"]);
//! assert_eq!(replay.winner.as_deref(), Some("bob"));
//! ```
//!
//! ## Batches
//!
//! ```rust
//! use hhreplay_engine::batch::parse_batch;
//! use hhreplay_engine::replay::HandParser;
//! use hhreplay_engine::segment::SegmenterConfig;
//!
//! let report = parse_batch("", &HandParser::new(), &SegmenterConfig::default());
//! assert_eq!(report.processed(), 0);
//! assert!(report.into_result().is_err());
//! ```

pub mod batch;
pub mod cards;
pub mod errors;
pub mod gaps;
pub mod grammar;
pub mod header;
pub mod hero;
pub mod language;
pub mod model;
pub mod replay;
pub mod seats;
pub mod segment;
pub mod street;
pub mod summary;
pub mod view;

pub use errors::{BatchError, RejectReason};
pub use model::HandReplay;
pub use replay::{parse_hand, HandParser, ParseOptions};
