// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the data layer for the CLI:
//
//   DatasetConfig     - where the areas live and how to build samples
//   DescribeUseCase   - builds an index and summarises it
//   SampleUseCase     - fetches one sample and renders a view of it
//   SplitUseCase      - seeded train/validation split of the areas
//
// No array math here and no printing; that belongs to Layer 4
// and Layer 1 respectively.

pub mod dataset_config;

pub mod describe_use_case;

pub mod sample_use_case;

pub mod split_use_case;
