use crate::error::Result;
use crate::transaction::Transaction;
use std::io::Read;

/// One node of the ledger: a transaction, the time it was recorded, and an
/// owning link to the next (older) block.
#[derive(Debug)]
pub struct Block {
    pub info: Transaction,
    pub time: String,
    pub next: Option<Box<Block>>,
}

/// The ledger itself: a finite, acyclic, singly-linked sequence of blocks.
///
/// The head is the most recently appended block, so traversal runs from
/// newest to oldest. An empty chain is a fully supported state; every
/// read-only operation returns its identity result for it.
#[derive(Debug, Default)]
pub struct BlockChain {
    head: Option<Box<Block>>,
}

impl BlockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads whitespace-separated `sender receiver value timestamp` tuples
    /// and builds a chain from them. The last tuple read becomes the head.
    ///
    /// Reading stops silently at the first incomplete tuple or failed value
    /// parse; a truncated source yields a shorter chain, not an error. Only
    /// reader failures are reported.
    pub fn load(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let chain = Self::from_tokens(text.split_whitespace());
        log::debug!("loaded chain of {} blocks", chain.len());
        Ok(chain)
    }

    /// Builds a chain from an already tokenized record stream.
    pub fn from_tokens<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Self {
        let mut chain = BlockChain::new();
        loop {
            let (Some(sender), Some(receiver), Some(value), Some(time)) =
                (tokens.next(), tokens.next(), tokens.next(), tokens.next())
            else {
                break;
            };
            let Ok(value) = value.parse::<u64>() else {
                break;
            };
            chain.append(Transaction::new(value, sender, receiver), time);
        }
        chain
    }

    /// Appends a transaction by prepending a new head block.
    pub fn append(&mut self, info: Transaction, time: impl Into<String>) {
        self.head = Some(Box::new(Block {
            info,
            time: time.into(),
            next: self.head.take(),
        }));
    }

    /// Appends a transaction stamped with the current UTC time.
    pub fn append_now(&mut self, info: Transaction) {
        let time = chrono::Utc::now().to_rfc3339();
        self.append(info, time);
    }

    /// Iterates over blocks from head (newest) to tail (oldest).
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            next: self.head.as_deref(),
        }
    }

    /// Number of blocks in the chain.
    pub fn len(&self) -> usize {
        self.blocks().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Net balance of `name` over the whole chain: credited where receiver,
    /// debited where sender. Summation is commutative, so block order never
    /// changes the result.
    pub fn personal_balance(&self, name: &str) -> i64 {
        self.blocks()
            .map(|block| {
                if block.info.sender == name {
                    -(block.info.value as i64)
                } else if block.info.receiver == name {
                    block.info.value as i64
                } else {
                    0
                }
            })
            .sum()
    }

    /// Renders the full ledger listing.
    ///
    /// The header line is followed by each block's ordinal (from 1), its
    /// transaction dump and its timestamp, separated by single newlines with
    /// no trailing separator. An empty chain renders only the header line.
    pub fn dump(&self) -> String {
        let body: Vec<String> = self
            .blocks()
            .enumerate()
            .map(|(index, block)| {
                format!("{}.\n{}\n{}", index + 1, block.info.dump_info(), block.time)
            })
            .collect();
        format!("BlockChain info:\n{}", body.join("\n"))
    }

    /// Renders one digest per block, head to tail, newline-joined with no
    /// trailing newline. An empty chain renders nothing.
    pub fn dump_hashed(&self) -> String {
        self.blocks()
            .map(|block| block.info.hashed_message())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Checks one digest token per block, head to tail, short-circuiting on
    /// the first mismatch or missing token.
    ///
    /// A well-formed digest stream holds exactly one token per block:
    /// leftover tokens past the last block fail verification, as does a
    /// stream that runs out early. An empty chain verifies against an empty
    /// stream only.
    pub fn verify_digests<'a>(&self, mut digests: impl Iterator<Item = &'a str>) -> bool {
        for block in self.blocks() {
            match digests.next() {
                Some(candidate) if block.info.verify_hashed_message(candidate) => {}
                _ => return false,
            }
        }
        digests.next().is_none()
    }

    /// Reads whitespace-separated digests and verifies them against the
    /// chain. Only reader failures are errors; mismatches are `Ok(false)`.
    pub fn verify_reader(&self, mut reader: impl Read) -> Result<bool> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(self.verify_digests(text.split_whitespace()))
    }

    /// Merges every block into the earliest block (in head-to-tail order)
    /// sharing its (sender, receiver) pair, summing values. Surviving blocks
    /// keep their first-occurrence order; absorbed blocks are destroyed.
    /// Calling this on an already compressed chain changes nothing.
    pub fn compress(&mut self) {
        let mut merged: Vec<Block> = Vec::new();
        let mut link = self.head.take();
        while let Some(mut block) = link {
            link = block.next.take();
            match merged
                .iter()
                .position(|kept| kept.info.same_parties(&block.info))
            {
                Some(index) => merged[index].info.value += block.info.value,
                None => merged.push(*block),
            }
        }
        // Relink survivors back into a chain, restoring traversal order.
        for block in merged.into_iter().rev() {
            self.head = Some(Box::new(Block {
                next: self.head.take(),
                ..block
            }));
        }
    }

    /// Applies `f` to every block's value. `f` must be pure; block values
    /// are independent, so processing order is unobservable.
    pub fn transform<F: Fn(u64) -> u64>(&mut self, f: F) {
        let mut cursor = self.head.as_deref_mut();
        while let Some(block) = cursor {
            block.info.value = f(block.info.value);
            cursor = block.next.as_deref_mut();
        }
    }

    /// Releases every block, leaving the chain empty. Safe to call on an
    /// already empty chain.
    pub fn clear(&mut self) {
        // Unlink one node at a time so dropping a long chain cannot recurse
        // through the whole tail.
        let mut link = self.head.take();
        while let Some(mut block) = link {
            link = block.next.take();
        }
    }
}

impl Drop for BlockChain {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Immutable head-to-tail block iterator.
pub struct Blocks<'a> {
    next: Option<&'a Block>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.next?;
        self.next = block.next.as_deref();
        Some(block)
    }
}
