//! OpenGL (ES) のオブジェクトに対するdelete処理を忘れたりすることをなくすために用意したラッパーライブラリ。
//! GLの各Objectを参照カウンタで管理して、参照がすべて破棄された際に
//! 自動で各種delete処理を行うようにしたラッパーの構造体の各種Handleが用意されている。
//!
//! GLのコンテキストは作成したスレッドに束縛されるので、
//! Handleは`Send`でも`Sync`でもなく、参照カウントも`Cell`で持つ。
//!
//! 基本的にHandle系の構造体は元のglowのオブジェクトにDerefする。
//! GLの標準以上の便利関数はutilsの中で提供する方針。
#![warn(missing_docs)]

pub mod handles;
pub use handles::*;

pub mod utils;
