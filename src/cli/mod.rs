//! CLI infrastructure for the Ultimate Tic-Tac-Toe toolkit
//!
//! This module provides the command-line interface for training and
//! evaluating the Q-learning agent and inspecting its learning metrics.

pub mod commands;
pub mod output;
