//! Primality check for table sizes / 查找表大小的素数检查

/// Exact test by 6k±1 trial division / 6k±1 试除法精确判定
pub fn is_prime(n: u64) -> bool {
  if n < 4 {
    return n >= 2;
  }
  if n % 2 == 0 || n % 3 == 0 {
    return false;
  }
  let mut i = 5u64;
  while i <= n / i {
    if n % i == 0 || n % (i + 2) == 0 {
      return false;
    }
    i += 6;
  }
  true
}
